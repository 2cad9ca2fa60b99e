//! HTML listing of the current dataset.
//!
//! The page shell is split around its `{{rows}}` slot once, when the server
//! starts; each request only formats the rows and concatenates.

use std::fmt::Write;

use crate::domain::{Dataset, NearEarthObject};

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Potentially hazardous asteroids</title>
</head>
<body>
<h1>Potentially hazardous asteroids</h1>
<p>{{as_of}}</p>
<img src="/image" alt="Estimated maximum diameter (km) by index" width="960">
<ul>
{{rows}}</ul>
</body>
</html>
"#;

const AS_OF_SLOT: &str = "{{as_of}}";
const ROWS_SLOT: &str = "{{rows}}";

/// The index page, pre-split around its slots.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    head: &'static str,
    middle: &'static str,
    tail: &'static str,
}

impl PageTemplate {
    pub fn new() -> Self {
        let (head, rest) = PAGE.split_once(AS_OF_SLOT).unwrap_or((PAGE, ""));
        let (middle, tail) = rest.split_once(ROWS_SLOT).unwrap_or((rest, ""));
        Self { head, middle, tail }
    }

    pub fn render(&self, dataset: &Dataset) -> String {
        let mut out = String::with_capacity(PAGE.len() + dataset.len() * 512);
        out.push_str(self.head);
        match dataset.as_of {
            Some(date) => {
                let _ = write!(out, "{} objects for the week starting {date}", dataset.len());
            }
            None => out.push_str("No data loaded."),
        }
        out.push_str(self.middle);
        for neo in &dataset.objects {
            push_row(&mut out, neo);
        }
        out.push_str(self.tail);
        out
    }
}

impl Default for PageTemplate {
    fn default() -> Self {
        Self::new()
    }
}

fn push_row(out: &mut String, neo: &NearEarthObject) {
    out.push_str("<li>\n");
    let _ = writeln!(out, "<p>{}</p>", escape(&neo.name));
    let _ = writeln!(
        out,
        "<p>Potentially hazardous: {}</p>",
        neo.is_potentially_hazardous_asteroid
    );
    let _ = writeln!(out, "<p>Absolute magnitude: {}</p>", neo.absolute_magnitude_h);
    let _ = writeln!(out, "<p>Size: {:.3} km</p>", neo.max_diameter_km());
    if let Some(approach) = neo.next_approach() {
        let _ = writeln!(
            out,
            "<p>Close approach {}: {} km/h</p>",
            escape(&approach.close_approach_date),
            escape(&approach.relative_velocity.kilometers_per_hour)
        );
    }
    if !neo.nasa_jpl_url.is_empty() {
        let _ = writeln!(
            out,
            "<p><a href=\"{}\">More information</a></p>",
            escape(&neo.nasa_jpl_url)
        );
    }
    out.push_str("</li>\n");
}

/// Minimal HTML text/attribute escaping.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::CloseApproach;

    fn neo(name: &str, magnitude: f64) -> NearEarthObject {
        NearEarthObject {
            name: name.to_string(),
            absolute_magnitude_h: magnitude,
            is_potentially_hazardous_asteroid: true,
            nasa_jpl_url: "https://ssd.jpl.nasa.gov/x?a=1&b=2".to_string(),
            close_approach_data: vec![CloseApproach {
                close_approach_date: "2024-02-03".to_string(),
                ..CloseApproach::default()
            }],
            ..NearEarthObject::default()
        }
    }

    #[test]
    fn empty_dataset_renders_empty_list() {
        let html = PageTemplate::new().render(&Dataset::default());
        assert!(html.contains("<ul>\n</ul>"));
        assert!(html.contains("No data loaded."));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn lists_each_object_in_order() {
        let dataset = Dataset::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            vec![neo("(2001 AA)", 19.5), neo("(2002 BB)", 22.1)],
        );
        let html = PageTemplate::new().render(&dataset);

        let first = html.find("(2001 AA)").unwrap();
        let second = html.find("(2002 BB)").unwrap();
        assert!(first < second);
        assert!(html.contains("Absolute magnitude: 19.5"));
        assert!(html.contains("Potentially hazardous: true"));
        assert!(html.contains("Close approach 2024-02-03"));
        assert!(html.contains("2 objects for the week starting 2024-02-01"));
        assert!(html.contains("a=1&amp;b=2"));
        assert_eq!(html.matches("<li>").count(), 2);
    }

    #[test]
    fn names_are_escaped() {
        let dataset = Dataset::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            vec![neo("<script>alert('x')</script>", 1.0)],
        );
        let html = PageTemplate::new().render(&dataset);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }
}
