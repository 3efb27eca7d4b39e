//! Shared utility functions for RegObs crates.

/// Text cleanup and transliteration helpers
pub mod text {
    use std::fmt::Display;

    /// Values RegObs uses where nothing was registered.
    pub const NOT_GIVEN: [&str; 3] = ["Not given", "Ikke gitt", "Ikke spesifisert"];

    const TRANSLITERATIONS: [(char, &str); 22] = [
        ('å', "aa"),
        ('ø', "oe"),
        ('æ', "ae"),
        ('Å', "AA"),
        ('Ø', "OE"),
        ('Æ', "AE"),
        ('ö', "o"),
        ('Ö', "O"),
        ('á', "a"),
        ('Á', "A"),
        ('č', "c"),
        ('Č', "C"),
        ('đ', "d"),
        ('Đ', "D"),
        ('ŋ', "n"),
        ('Ŋ', "N"),
        ('š', "s"),
        ('Š', "S"),
        ('ŧ', "t"),
        ('Ŧ', "T"),
        ('ž', "z"),
        ('Ž', "Z"),
    ];

    /// Replace Norwegian and Sami letters with ASCII, trim, and drop
    /// newlines and tabs.
    pub fn remove_norwegian_letters(name: &str) -> String {
        let mut out = String::with_capacity(name.len());
        for c in name.trim().chars() {
            match TRANSLITERATIONS.iter().find(|(from, _)| *from == c) {
                Some((_, to)) => out.push_str(to),
                None if c == '\n' || c == '\t' => {}
                None => out.push(c),
            }
        }
        out
    }

    /// Turn `ae`, `oe` and `aa` (and upper case) back into æ, ø and å.
    pub fn add_norwegian_letters(name: &str) -> String {
        [
            ("ae", "æ"),
            ("oe", "ø"),
            ("aa", "å"),
            ("AE", "Æ"),
            ("OE", "Ø"),
            ("AA", "Å"),
        ]
        .iter()
        .fold(name.to_string(), |acc, (from, to)| acc.replace(from, to))
    }

    /// Strip characters that cause trouble in file names.
    pub fn make_standard_file_name(name: &str) -> String {
        let name: String = name.chars().filter(|c| !matches!(c, ',' | '/' | '"')).collect();
        remove_norwegian_letters(&name)
    }

    /// Tidy free text: single spaces, no padding around dashes, one space after
    /// commas and periods, and a terminating period unless the text already
    /// ends with `.` or `!`. Empty text stays empty.
    pub fn text_cleanup(text: &str) -> String {
        let text: String = text
            .trim_end()
            .replace("<br/><br/>", " ")
            .chars()
            .filter(|c| *c != '\n' && *c != '\t')
            .collect();
        if text.is_empty() {
            return text;
        }

        let mut text = text.split(' ').filter(|s| !s.is_empty()).collect::<Vec<_>>().join(" ");
        text = text.replace(" - ", "-").replace(" -", "-").replace("- ", "-");
        if text.contains(',') {
            text = text.split(',').map(str::trim).collect::<Vec<_>>().join(", ");
        }
        if text.contains('.') {
            text = text.split('.').map(str::trim).collect::<Vec<_>>().join(". ");
        }
        let mut text = text.trim().to_string();
        if !(text.ends_with('.') || text.ends_with('!')) {
            text.push('.');
        }
        text
    }

    /// Render a value for a report cell. Absent and "not given" values are
    /// empty.
    pub fn make_str<T: Display>(value: Option<T>) -> String {
        match value {
            None => String::new(),
            Some(v) => {
                let s = v.to_string();
                if NOT_GIVEN.contains(&s.as_str()) {
                    String::new()
                } else {
                    s
                }
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_remove_norwegian_letters() {
            assert_eq!(remove_norwegian_letters("  Bærum\tØst\n"), "BaerumOEst");
            assert_eq!(remove_norwegian_letters("Kåfjord"), "Kaafjord");
            assert_eq!(remove_norwegian_letters("Guovdageaidnu Čáhcesuolu"), "Guovdageaidnu Cahcesuolu");
            assert_eq!(remove_norwegian_letters("Longyearbyen Ö"), "Longyearbyen O");
        }

        #[test]
        fn test_add_norwegian_letters() {
            assert_eq!(add_norwegian_letters("Proeve"), "Prøve");
            assert_eq!(add_norwegian_letters("Kaafjord"), "Kåfjord");
            assert_eq!(add_norwegian_letters("OEST"), "ØST");
        }

        #[test]
        fn test_make_standard_file_name() {
            assert_eq!(make_standard_file_name("Tromsø, \"nord\"/sør"), "Tromsoe nordsoer");
        }

        #[test]
        fn test_text_cleanup() {
            assert_eq!(text_cleanup("Snow  falling ,wind from north"), "Snow falling, wind from north.");
            assert_eq!(text_cleanup("Cracks.Whumpf"), "Cracks. Whumpf.");
            assert_eq!(text_cleanup("North - east"), "North-east.");
            assert_eq!(text_cleanup("Very quick!"), "Very quick!");
            assert_eq!(text_cleanup("line<br/><br/>next\n"), "line next.");
            assert_eq!(text_cleanup(""), "");
        }

        #[test]
        fn test_make_str() {
            assert_eq!(make_str(Some("Ikke gitt")), "");
            assert_eq!(make_str(Some("Not given")), "");
            assert_eq!(make_str(Some("Ikke spesifisert")), "");
            assert_eq!(make_str::<i32>(None), "");
            assert_eq!(make_str(Some(0.35)), "0.35");
            assert_eq!(make_str(Some("ECTP12")), "ECTP12");
        }
    }
}

/// Date utility functions
pub mod dates {
    use anyhow::{anyhow, Context};
    use chrono::{DateTime, Utc};

    /// Parse a unix time in milliseconds, either plain (`1580893200000`) or
    /// wrapped the OData way (`/Date(1580893200000)/`). Sub-second precision
    /// is dropped.
    pub fn unix_time_to_datetime(value: &str) -> anyhow::Result<DateTime<Utc>> {
        let value = value.trim();
        let millis = value
            .strip_prefix("/Date(")
            .and_then(|s| s.strip_suffix(")/"))
            .unwrap_or(value);
        // OData dates may carry a zone suffix such as `+0100`
        let millis = millis
            .char_indices()
            .skip(1)
            .find(|(_, c)| *c == '+' || *c == '-')
            .map_or(millis, |(end, _)| &millis[..end]);
        let millis: i64 = millis
            .parse()
            .with_context(|| format!("not a unix time in milliseconds: {}", value))?;
        DateTime::from_timestamp(millis.div_euclid(1000), 0)
            .ok_or_else(|| anyhow!("unix time out of range: {}", value))
    }

}
