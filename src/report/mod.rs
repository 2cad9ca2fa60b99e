//! Reporting: the HTML index page and the plain-text load summary.

use crate::domain::Dataset;

pub mod page;

pub use page::PageTemplate;

/// Plain-text summary of a dataset, one block per object.
pub fn format_dataset_summary(dataset: &Dataset) -> String {
    let mut out = String::new();
    match dataset.as_of {
        Some(date) => out.push_str(&format!(
            "=== {} potentially hazardous asteroids from {date} ===\n",
            dataset.len()
        )),
        None => out.push_str("=== no dataset loaded ===\n"),
    }

    for neo in &dataset.objects {
        out.push_str(&format!("Asteroid Name: {}\n", neo.name));
        out.push_str(&format!("Reference ID: {}\n", neo.neo_reference_id));
        out.push_str(&format!(
            "Potentially Hazardous: {}\n",
            neo.is_potentially_hazardous_asteroid
        ));
        out.push_str(&format!("Absolute Magnitude: {}\n", neo.absolute_magnitude_h));
        out.push_str(&format!("Size in km: {}\n", neo.max_diameter_km()));
        for approach in &neo.close_approach_data {
            out.push_str(&format!(
                "Speed on {}: {} km/h\n",
                approach.close_approach_date, approach.relative_velocity.kilometers_per_hour
            ));
        }
        out.push_str(&format!("More information at: {}\n\n", neo.nasa_jpl_url));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::{CloseApproach, NearEarthObject, RelativeVelocity};

    #[test]
    fn summary_lists_every_approach() {
        let neo = NearEarthObject {
            name: "(1999 XY)".to_string(),
            is_potentially_hazardous_asteroid: true,
            nasa_jpl_url: "https://example.invalid/neo".to_string(),
            close_approach_data: vec![
                CloseApproach {
                    close_approach_date: "2024-01-01".to_string(),
                    relative_velocity: RelativeVelocity {
                        kilometers_per_hour: "1000.5".to_string(),
                        ..RelativeVelocity::default()
                    },
                    ..CloseApproach::default()
                },
                CloseApproach {
                    close_approach_date: "2031-07-12".to_string(),
                    ..CloseApproach::default()
                },
            ],
            ..NearEarthObject::default()
        };
        let dataset = Dataset::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), vec![neo]);

        let text = format_dataset_summary(&dataset);
        assert!(text.starts_with("=== 1 potentially hazardous asteroids from 2024-01-01 ==="));
        assert!(text.contains("Asteroid Name: (1999 XY)"));
        assert!(text.contains("Speed on 2024-01-01: 1000.5 km/h"));
        assert!(text.contains("Speed on 2031-07-12"));
        assert!(text.contains("More information at: https://example.invalid/neo"));
    }

    #[test]
    fn summary_of_empty_store() {
        assert_eq!(format_dataset_summary(&Dataset::default()), "=== no dataset loaded ===\n");
    }
}
