//! Plain list of launches

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Launch {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date_utc: Option<DateTime<Utc>>,
    #[serde(default)]
    pub success: Option<bool>,
}

impl Launch {
    fn outcome(&self) -> &'static str {
        match self.success {
            Some(true) => "success",
            Some(false) => "failure",
            None => "",
        }
    }

    /// One list line: date, name, outcome (date and outcome when known)
    pub fn line(&self) -> String {
        let mut line = match self.date_utc {
            Some(date) => format!("{}  {}", date.format("%Y-%m-%d"), self.name),
            None => format!("{:10}  {}", "", self.name),
        };
        let outcome = self.outcome();
        if !outcome.is_empty() {
            line.push_str(&format!(" ({})", outcome));
        }
        line
    }
}

/// All launches, one per line, oldest first; undated launches go last in input order
pub fn format_list(launches: &[Launch]) -> String {
    let mut sorted: Vec<&Launch> = launches.iter().collect();
    sorted.sort_by_key(|l| (l.date_utc.is_none(), l.date_utc));
    sorted.iter().map(|l| l.line() + "\n").collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_launch() {
        let json = r#"[{"name": "FalconSat", "date_utc": "2006-03-24T22:30:00.000Z", "success": false, "id": "x"},
                       {"name": "Crew-9", "date_utc": null, "success": null}]"#;
        let launches: Vec<Launch> = serde_json::from_str(json).unwrap();
        assert_eq!(launches.len(), 2);
        assert_eq!(launches[0].line(), "2006-03-24  FalconSat (failure)");
        assert_eq!(launches[1].line(), "            Crew-9");
    }

    #[test]
    fn undated_launches_keep_input_order() {
        let launches = vec![
            Launch { name: "A".into(), date_utc: None, success: Some(true) },
            Launch { name: "B".into(), date_utc: None, success: None },
        ];
        let list = format_list(&launches);
        let names: Vec<_> = list.lines().map(str::trim).collect();
        assert_eq!(names, vec!["A (success)", "B"]);
    }

    #[test]
    fn list_is_oldest_first_with_undated_last() {
        let json = r#"[{"name": "Crew-5", "date_utc": "2022-10-05T16:00:00.000Z"},
                       {"name": "TBD", "date_utc": null},
                       {"name": "FalconSat", "date_utc": "2006-03-24T22:30:00.000Z"},
                       {"name": "RatSat", "date_utc": "2008-09-28T23:15:00.000Z"}]"#;
        let launches: Vec<Launch> = serde_json::from_str(json).unwrap();
        let list = format_list(&launches);
        let names: Vec<_> = list.lines().map(|l| l[12..].to_string()).collect();
        assert_eq!(names, vec!["FalconSat", "RatSat", "Crew-5", "TBD"]);
    }
}
