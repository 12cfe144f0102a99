use chrono::Timelike;

/// "Updated: HH:MM" label content for the panel footer.
pub fn clock_label<T: Timelike>(time: &T) -> String {
    format!("Updated: {:02}:{:02}", time.hour(), time.minute())
}

pub fn current_clock_label() -> String {
    clock_label(&chrono::Local::now())
}

#[cfg(test)]
mod tests {
    use super::clock_label;
    use chrono::NaiveTime;

    #[test]
    fn pads_single_digit_hours_and_minutes() {
        let t = NaiveTime::from_hms_opt(9, 7, 33).unwrap();
        assert_eq!(clock_label(&t), "Updated: 09:07");
    }

    #[test]
    fn keeps_24_hour_clock() {
        let t = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
        assert_eq!(clock_label(&t), "Updated: 23:59");
    }
}
