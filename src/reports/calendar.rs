//! Calendar binding
//!
//! Groups subscriptions by the day of the displayed month they bill on and
//! lays the month out as a Sunday-first grid.

use crate::display::report::{format_header, separator};
use crate::models::{CalendarDate, Subscription, YearMonth};

/// Column headers for the Sunday-first week
pub const WEEKDAY_HEADERS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Markers shown in a day cell before the rest collapse into "+N"
pub const DEFAULT_MARKER_LIMIT: usize = 3;

const CELL_WIDTH: usize = 5;

/// Subscriptions billing on each day of one month
///
/// Covers every day `1..=days_in_month`, including days with nothing due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGrouping<'a> {
    month: YearMonth,
    days: Vec<Vec<&'a Subscription>>,
}

impl<'a> DayGrouping<'a> {
    pub fn month(&self) -> YearMonth {
        self.month
    }

    /// Number of days covered (28 to 31)
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Subscriptions billing on `day`, or `None` if the month has no such day
    pub fn get(&self, day: u32) -> Option<&[&'a Subscription]> {
        let index = usize::try_from(day).ok()?.checked_sub(1)?;
        self.days.get(index).map(Vec::as_slice)
    }

    /// `(day, subscriptions)` pairs in day order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[&'a Subscription])> + '_ {
        self.days
            .iter()
            .enumerate()
            .map(|(i, subs)| (i as u32 + 1, subs.as_slice()))
    }

    /// Days that have at least one charge
    pub fn billing_days(&self) -> impl Iterator<Item = (u32, &[&'a Subscription])> + '_ {
        self.iter().filter(|(_, subs)| !subs.is_empty())
    }
}

/// Group subscriptions by the day of `month` their next billing date falls on
///
/// Order within a day follows the input order.
pub fn group_by_day(subscriptions: &[Subscription], month: YearMonth) -> DayGrouping<'_> {
    let mut days: Vec<Vec<&Subscription>> = vec![Vec::new(); month.days_in_month() as usize];

    for sub in subscriptions {
        if month.contains(&sub.next_billing_date) {
            days[(sub.next_billing_date.day() - 1) as usize].push(sub);
        }
    }

    DayGrouping { month, days }
}

/// Weekday of the 1st of `month`, 0 = Sunday through 6 = Saturday
///
/// This is the number of blank cells before day 1 in a Sunday-first grid.
pub fn first_weekday_offset(month: YearMonth) -> u32 {
    month.first_day().weekday_from_sunday()
}

/// One day in the rendered calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell<'a> {
    pub date: CalendarDate,
    pub entries: Vec<&'a Subscription>,
    pub selected: bool,
    marker_limit: usize,
}

impl<'a> DayCell<'a> {
    pub fn has_charges(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Entries that get their own marker
    pub fn visible(&self) -> &[&'a Subscription] {
        &self.entries[..self.entries.len().min(self.marker_limit)]
    }

    /// Entries collapsed into the "+N" indicator
    pub fn overflow(&self) -> usize {
        self.entries.len().saturating_sub(self.marker_limit)
    }
}

/// A month laid out for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView<'a> {
    pub month: YearMonth,
    /// Blank cells before day 1
    pub leading_blanks: u32,
    pub cells: Vec<DayCell<'a>>,
}

impl<'a> CalendarView<'a> {
    /// Build the view for `month`, marking `selected` if it falls inside it
    pub fn build(
        subscriptions: &'a [Subscription],
        month: YearMonth,
        selected: Option<CalendarDate>,
        marker_limit: usize,
    ) -> Self {
        let grouping = group_by_day(subscriptions, month);

        let cells = grouping
            .iter()
            .filter_map(|(day, subs)| {
                let date = month.day(day)?;
                Some(DayCell {
                    date,
                    entries: subs.to_vec(),
                    selected: selected == Some(date),
                    marker_limit,
                })
            })
            .collect();

        Self {
            month,
            leading_blanks: first_weekday_offset(month),
            cells,
        }
    }

    /// Number of week rows the grid needs
    pub fn week_rows(&self) -> usize {
        (self.leading_blanks as usize + self.cells.len()).div_ceil(7)
    }

    /// Render the month as a text grid followed by the charges per day
    ///
    /// The selected day is bracketed and days with charges carry a `*`.
    pub fn format_terminal(&self) -> String {
        let grid_width = 7 * CELL_WIDTH + 6;
        let mut output = String::new();

        output.push_str(&format_header(&self.month.long_label(), grid_width));
        output.push('\n');

        let headers: Vec<String> = WEEKDAY_HEADERS
            .iter()
            .map(|h| format!("{:^width$}", h, width = CELL_WIDTH))
            .collect();
        output.push_str(headers.join(" ").trim_end());
        output.push('\n');
        output.push_str(&separator(grid_width));
        output.push('\n');

        let blanks = (0..self.leading_blanks).map(|_| " ".repeat(CELL_WIDTH));
        let days = self.cells.iter().map(format_cell);
        let slots: Vec<String> = blanks.chain(days).collect();

        for week in slots.chunks(7) {
            output.push_str(week.join(" ").trim_end());
            output.push('\n');
        }

        let billing: Vec<&DayCell> = self.cells.iter().filter(|c| c.has_charges()).collect();
        if !billing.is_empty() {
            output.push('\n');
            for cell in billing {
                let names: Vec<&str> = cell.visible().iter().map(|s| s.name.as_str()).collect();
                output.push_str(&format!("{:>2}: {}", cell.date.day(), names.join(", ")));
                if cell.overflow() > 0 {
                    output.push_str(&format!(" +{}", cell.overflow()));
                }
                output.push('\n');
            }
        }

        output
    }
}

fn format_cell(cell: &DayCell) -> String {
    let (open, close) = if cell.selected { ('[', ']') } else { (' ', ' ') };
    let mark = if cell.has_charges() { '*' } else { ' ' };
    format!("{}{:>2}{}{}", open, cell.date.day(), close, mark)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillingCycle, Money};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    fn sub(name: &str, due: CalendarDate) -> Subscription {
        Subscription::new(name, Money::from_cents(100), BillingCycle::Monthly, due)
    }

    fn seed() -> Vec<Subscription> {
        vec![
            sub("Amazon Prime", date(2024, 10, 30)),
            sub("GoDaddy Hosting", date(2024, 10, 30)),
        ]
    }

    #[test]
    fn test_group_by_day_october() {
        let subs = seed();
        let grouping = group_by_day(&subs, month(2024, 10));

        assert_eq!(grouping.len(), 31);
        let day_30: Vec<&str> = grouping
            .get(30)
            .unwrap()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(day_30, vec!["Amazon Prime", "GoDaddy Hosting"]);

        for (day, subs) in grouping.iter() {
            if day != 30 {
                assert!(subs.is_empty(), "day {} should be empty", day);
            }
        }
    }

    #[test]
    fn test_group_by_day_other_month_is_empty() {
        let subs = seed();
        let grouping = group_by_day(&subs, month(2024, 11));
        assert_eq!(grouping.len(), 30);
        assert_eq!(grouping.billing_days().count(), 0);
    }

    #[test]
    fn test_same_day_other_year_excluded() {
        let subs = vec![sub("Old", date(2023, 10, 30))];
        let grouping = group_by_day(&subs, month(2024, 10));
        assert!(grouping.get(30).unwrap().is_empty());
    }

    #[test]
    fn test_february_lengths() {
        assert_eq!(group_by_day(&[], month(2024, 2)).len(), 29);
        assert_eq!(group_by_day(&[], month(2023, 2)).len(), 28);
        assert_eq!(group_by_day(&[], month(2100, 2)).len(), 28);
        assert_eq!(group_by_day(&[], month(2000, 2)).len(), 29);
    }

    #[test]
    fn test_get_out_of_range() {
        let grouping = group_by_day(&[], month(2024, 4));
        assert!(grouping.get(0).is_none());
        assert!(grouping.get(31).is_none());
        assert!(grouping.get(30).is_some());
    }

    #[test]
    fn test_first_weekday_offset() {
        // 2024-10-01 was a Tuesday, 2023-10-01 a Sunday, 2024-06-01 a Saturday
        assert_eq!(first_weekday_offset(month(2024, 10)), 2);
        assert_eq!(first_weekday_offset(month(2023, 10)), 0);
        assert_eq!(first_weekday_offset(month(2024, 6)), 6);
    }

    #[test]
    fn test_marker_overflow() {
        let due = date(2024, 10, 5);
        let subs: Vec<Subscription> = (0..5).map(|i| sub(&format!("S{}", i), due)).collect();
        let view = CalendarView::build(&subs, month(2024, 10), None, DEFAULT_MARKER_LIMIT);

        let cell = &view.cells[4];
        assert_eq!(cell.date, due);
        assert_eq!(cell.visible().len(), 3);
        assert_eq!(cell.visible()[0].name, "S0");
        assert_eq!(cell.overflow(), 2);

        let text = view.format_terminal();
        assert!(text.contains(" 5: S0, S1, S2 +2"));
    }

    #[test]
    fn test_view_layout() {
        let subs = seed();
        let view = CalendarView::build(&subs, month(2024, 10), Some(date(2024, 10, 15)), 3);

        assert_eq!(view.leading_blanks, 2);
        assert_eq!(view.cells.len(), 31);
        assert_eq!(view.week_rows(), 5);
        assert!(view.cells[14].selected);
        assert!(view.cells[29].has_charges());

        let text = view.format_terminal();
        assert!(text.contains("October 2024"));
        assert!(text.contains("SUN"));
        assert!(text.contains("[15]"));
        assert!(text.contains(" 30 *"));
        assert!(text.contains("30: Amazon Prime, GoDaddy Hosting"));
    }

    #[test]
    fn test_selection_outside_month_ignored() {
        let view = CalendarView::build(&[], month(2024, 10), Some(date(2024, 11, 15)), 3);
        assert!(view.cells.iter().all(|c| !c.selected));
    }

    fn arb_subscription() -> impl Strategy<Value = Subscription> {
        (2023i32..2026, 1u32..=12, 1u32..=31).prop_map(|(y, m, d)| {
            let d = d.min(crate::models::days_in_month(y, m));
            sub("Generated", date(y, m, d))
        })
    }

    proptest! {
        #[test]
        fn grouping_covers_every_day(y in 1900i32..2200, m in 1u32..=12) {
            let grouping = group_by_day(&[], month(y, m));
            let days: Vec<u32> = grouping.iter().map(|(d, _)| d).collect();
            let expected: Vec<u32> = (1..=crate::models::days_in_month(y, m)).collect();
            prop_assert_eq!(days, expected);
        }

        #[test]
        fn grouping_partitions_month(
            subs in prop::collection::vec(arb_subscription(), 0..50),
            y in 2023i32..2026,
            m in 1u32..=12,
        ) {
            let target = month(y, m);
            let grouping = group_by_day(&subs, target);

            let mut grouped: Vec<uuid::Uuid> = grouping
                .iter()
                .flat_map(|(_, subs)| subs.iter().map(|s| *s.id.as_uuid()))
                .collect();
            let mut expected: Vec<uuid::Uuid> = subs
                .iter()
                .filter(|s| target.contains(&s.next_billing_date))
                .map(|s| *s.id.as_uuid())
                .collect();
            grouped.sort();
            expected.sort();
            prop_assert_eq!(grouped, expected);

            for (day, subs) in grouping.iter() {
                for s in subs {
                    prop_assert_eq!(s.next_billing_date.day(), day);
                }
            }
        }

        #[test]
        fn offset_in_range(y in 1900i32..2200, m in 1u32..=12) {
            prop_assert!(first_weekday_offset(month(y, m)) <= 6);
        }
    }
}
