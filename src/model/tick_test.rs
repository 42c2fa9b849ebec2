// Tests for tick age arithmetic.

#[cfg(test)]
mod tests {
    use crate::model::tick_age;

    #[test]
    fn test_age_of_monotone_ticks() {
        assert_eq!(tick_age(10, 0), Some(10));
        assert_eq!(tick_age(10, 10), Some(0));
        assert_eq!(tick_age(u64::MAX, 0), Some(u64::MAX));
    }

    #[test]
    fn test_rolled_back_tick_has_no_age() {
        // A rewound tick source must read as "not expired", never as a
        // huge unsigned age.
        assert_eq!(tick_age(0, 1), None);
        assert_eq!(tick_age(50, 100), None);
    }
}
