use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// set of weekdays, indexed monday = 0 .. sunday = 6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    const ALL_BITS: u8 = 0b0111_1111;

    pub fn empty() -> Self {
        WeekdaySet(0)
    }

    pub fn all() -> Self {
        WeekdaySet(Self::ALL_BITS)
    }

    /// the five forex/equity session days
    pub fn monday_to_friday() -> Self {
        WeekdaySet(0b0001_1111)
    }

    /// flags in monday..sunday order
    pub fn from_flags(flags: [bool; 7]) -> Self {
        let bits = flags
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .fold(0u8, |acc, (index, _)| acc | (1 << index));
        WeekdaySet(bits)
    }

    /// indices 0..=6, anything larger is ignored
    pub fn from_indices<I: IntoIterator<Item = u8>>(indices: I) -> Self {
        let bits = indices
            .into_iter()
            .filter(|index| *index < 7)
            .fold(0u8, |acc, index| acc | (1 << index));
        WeekdaySet(bits)
    }

    pub fn with(self, weekday: Weekday) -> Self {
        WeekdaySet(self.0 | (1 << weekday.num_days_from_monday()))
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.num_days_from_monday()) != 0
    }

    pub fn len(&self) -> u32 {
        (self.0 & Self::ALL_BITS).count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.0 & Self::ALL_BITS == Self::ALL_BITS
    }

    pub fn to_flags(&self) -> [bool; 7] {
        let mut flags = [false; 7];
        for (index, flag) in flags.iter_mut().enumerate() {
            *flag = self.0 & (1 << index) != 0;
        }
        flags
    }
}

/// which calendar days accrue interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TradingDayPolicy {
    /// every calendar day counts
    #[default]
    AllDays,
    /// only the flagged weekdays count
    Weekdays(WeekdaySet),
}

impl TradingDayPolicy {
    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        match self {
            TradingDayPolicy::AllDays => true,
            TradingDayPolicy::Weekdays(set) => set.contains(date.weekday()),
        }
    }

    /// trading days in [start, start + days)
    pub fn count_trading_days(&self, start: NaiveDate, days: u32) -> u32 {
        match self {
            TradingDayPolicy::AllDays => days,
            TradingDayPolicy::Weekdays(_) => TradingCalendar::new(*self, start, days)
                .filter(|day| day.is_trading)
                .count() as u32,
        }
    }
}

/// one calendar day of a projection walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    /// 1-based position within the span
    pub day: u32,
    pub date: NaiveDate,
    pub is_trading: bool,
    /// 1-based trading day ordinal, 0 on non-trading days
    pub trading_ordinal: u32,
}

/// walks every calendar day of a span, numbering the trading days
#[derive(Debug, Clone)]
pub struct TradingCalendar {
    policy: TradingDayPolicy,
    next_date: Option<NaiveDate>,
    day: u32,
    total_days: u32,
    trading_seen: u32,
}

impl TradingCalendar {
    pub fn new(policy: TradingDayPolicy, start: NaiveDate, total_days: u32) -> Self {
        Self {
            policy,
            next_date: Some(start),
            day: 0,
            total_days,
            trading_seen: 0,
        }
    }
}

impl Iterator for TradingCalendar {
    type Item = CalendarDay;

    fn next(&mut self) -> Option<CalendarDay> {
        if self.day >= self.total_days {
            return None;
        }
        let date = self.next_date?;
        self.next_date = date.succ_opt();
        self.day += 1;

        let is_trading = self.policy.is_trading_day(date);
        if is_trading {
            self.trading_seen += 1;
        }

        Some(CalendarDay {
            day: self.day,
            date,
            is_trading,
            trading_ordinal: if is_trading { self.trading_seen } else { 0 },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        // 2024-01-01 was a monday
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_weekday_set_indexing() {
        let set = WeekdaySet::from_flags([true, false, false, false, true, false, true]);

        assert!(set.contains(Weekday::Mon));
        assert!(set.contains(Weekday::Fri));
        assert!(set.contains(Weekday::Sun));
        assert!(!set.contains(Weekday::Tue));
        assert_eq!(set.len(), 3);
        assert_eq!(set, WeekdaySet::from_indices([0, 4, 6, 9]));
        assert_eq!(set.to_flags(), [true, false, false, false, true, false, true]);
    }

    #[test]
    fn test_weekday_presets() {
        assert_eq!(WeekdaySet::monday_to_friday().len(), 5);
        assert!(WeekdaySet::all().is_full());
        assert!(WeekdaySet::empty().is_empty());
        assert_eq!(
            WeekdaySet::empty().with(Weekday::Sat).with(Weekday::Sun),
            WeekdaySet::from_indices([5, 6])
        );
    }

    #[test]
    fn test_all_days_counts_everything() {
        assert_eq!(TradingDayPolicy::AllDays.count_trading_days(monday(), 60), 60);
    }

    #[test]
    fn test_weekday_policy_counts() {
        let policy = TradingDayPolicy::Weekdays(WeekdaySet::monday_to_friday());

        // two full weeks
        assert_eq!(policy.count_trading_days(monday(), 14), 10);
        // monday..wednesday
        assert_eq!(policy.count_trading_days(monday(), 3), 3);
        assert_eq!(policy.count_trading_days(monday(), 0), 0);

        let nothing = TradingDayPolicy::Weekdays(WeekdaySet::empty());
        assert_eq!(nothing.count_trading_days(monday(), 30), 0);
    }

    #[test]
    fn test_calendar_walk_ordinals() {
        let policy = TradingDayPolicy::Weekdays(WeekdaySet::monday_to_friday());
        let days: Vec<CalendarDay> = TradingCalendar::new(policy, monday(), 8).collect();

        assert_eq!(days.len(), 8);
        assert_eq!(days[0].day, 1);
        assert_eq!(days[0].date, monday());
        assert_eq!(days[4].trading_ordinal, 5);
        // saturday and sunday
        assert!(!days[5].is_trading);
        assert_eq!(days[6].trading_ordinal, 0);
        // next monday
        assert_eq!(days[7].trading_ordinal, 6);
    }
}
