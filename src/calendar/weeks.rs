use super::util::{leading_blanks, Week, DAYS_IN_WEEK};

/// The days of one month laid out in rows of seven columns
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct WeekGrid {
    leading: u8,
    weeks: Vec<Week>,
}

impl WeekGrid {
    pub(crate) fn new(first_weekday: u8, week_start: u8, month_days: u8) -> WeekGrid {
        let leading = leading_blanks(first_weekday, week_start);
        let days = (1..=month_days).collect::<Vec<_>>();
        let offset = usize::from(leading);
        let mut weeks = Vec::with_capacity(6);
        let rest = if offset > 0 {
            let (first, rest) = days.split_at((DAYS_IN_WEEK - offset).min(days.len()));
            weeks.push(Week::from_days(offset, first));
            rest
        } else {
            &days[..]
        };
        weeks.extend(rest.chunks(DAYS_IN_WEEK).map(|chunk| Week::from_days(0, chunk)));
        WeekGrid { leading, weeks }
    }

    pub(crate) fn leading(&self) -> u8 {
        self.leading
    }

    pub(crate) fn weeks(&self) -> &[Week] {
        &self.weeks
    }
}

#[cfg(test)]
mod tests {
    use super::super::util::Cell;
    use super::*;

    fn first_week(grid: &WeekGrid) -> Vec<Option<u8>> {
        grid.weeks()
            .first()
            .expect("grid should have at least one week")
            .cells()
            .map(Cell::day)
            .collect()
    }

    #[test]
    fn test_january_2021_sunday_start() {
        let grid = WeekGrid::new(5, 0, 31);
        assert_eq!(grid.leading(), 5);
        assert_eq!(
            first_week(&grid),
            [None, None, None, None, None, Some(1), Some(2)]
        );
        assert_eq!(grid.weeks().len(), 6);
    }

    #[test]
    fn test_january_2021_monday_start() {
        let grid = WeekGrid::new(5, 1, 31);
        assert_eq!(grid.leading(), 4);
        assert_eq!(
            first_week(&grid),
            [None, None, None, None, Some(1), Some(2), Some(3)]
        );
        assert_eq!(grid.weeks().len(), 5);
    }

    #[test]
    fn test_aligned_february() {
        // February 2015 starts on a Sunday and has exactly four weeks
        let grid = WeekGrid::new(0, 0, 28);
        assert_eq!(grid.leading(), 0);
        assert_eq!(grid.weeks().len(), 4);
        assert_eq!(
            first_week(&grid),
            [1u8, 2, 3, 4, 5, 6, 7].map(Some)
        );
        let last = grid.weeks().last().expect("grid should not be empty");
        assert_eq!(last[6], Cell::Day(28));
    }

    #[test]
    fn test_trailing_padding() {
        let grid = WeekGrid::new(5, 0, 31);
        let last = grid.weeks().last().expect("grid should not be empty");
        let cells = last.cells().map(Cell::day).collect::<Vec<_>>();
        assert_eq!(cells, [Some(31), None, None, None, None, None, None]);
    }

    #[test]
    fn test_every_day_once() {
        for month_days in 28..=31 {
            for first in 0..7 {
                for start in 0..7 {
                    let grid = WeekGrid::new(first, start, month_days);
                    let total = usize::from(month_days) + usize::from(grid.leading());
                    assert_eq!(grid.weeks().len(), total.div_ceil(7));
                    let days = grid
                        .weeks()
                        .iter()
                        .flat_map(Week::cells)
                        .filter_map(Cell::day)
                        .collect::<Vec<_>>();
                    assert_eq!(days, (1..=month_days).collect::<Vec<_>>());
                    let leading = grid.weeks()[0]
                        .cells()
                        .take_while(|c| *c == Cell::Blank)
                        .count();
                    assert_eq!(leading, usize::from(grid.leading()));
                }
            }
        }
    }
}
