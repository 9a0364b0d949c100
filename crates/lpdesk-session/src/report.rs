use std::fmt;

use crate::model::{Solution, Status};

/// Format a number with at most six decimals and no trailing zeros
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let text = format!("{:.6}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        _ => text.to_string(),
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status: {}", self.status)?;

        if self.status != Status::Optimal {
            if let Some(message) = self.message() {
                writeln!(f, "{}", message)?;
            }
            return Ok(());
        }

        for v in &self.values {
            writeln!(f, "{} = {}", v.name, format_value(v.value))?;
        }
        if let Some(objective) = self.objective_value {
            writeln!(f, "Objective value: {}", format_value(objective))?;
        }

        if !self.sensitivity.is_empty() {
            writeln!(f)?;
            writeln!(f, "Constraint sensitivity:")?;
            writeln!(f, "  {:<10} {:>14} {:>14}", "Constraint", "Shadow price", "Slack")?;
            for s in &self.sensitivity {
                writeln!(
                    f,
                    "  {:<10} {:>14} {:>14}",
                    s.label,
                    format_value(s.shadow_price),
                    format_value(s.slack)
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConstraintSensitivity, VariableValue};

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(12.0), "12");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(-0.0), "0");
        assert_eq!(format_value(-0.0000001), "0");
        assert_eq!(format_value(1.0 / 3.0), "0.333333");
        assert_eq!(format_value(f64::INFINITY), "inf");
    }

    #[test]
    fn test_optimal_report() {
        let solution = Solution {
            status: Status::Optimal,
            values: vec![
                VariableValue { name: "x1".to_string(), value: 4.0 },
                VariableValue { name: "x2".to_string(), value: 0.0 },
            ],
            objective_value: Some(12.0),
            sensitivity: vec![ConstraintSensitivity {
                label: "R0".to_string(),
                shadow_price: 3.0,
                slack: 0.0,
            }],
            rebuilt: false,
        };
        let text = solution.to_string();
        assert!(text.starts_with("Status: Optimal\n"));
        assert!(text.contains("x1 = 4\n"));
        assert!(text.contains("x2 = 0\n"));
        assert!(text.contains("Objective value: 12\n"));
        let row = text.lines().last().unwrap();
        assert_eq!(row.split_whitespace().collect::<Vec<_>>(), vec!["R0", "3", "0"]);
    }

    #[test]
    fn test_unbounded_report() {
        let solution = Solution {
            status: Status::Unbounded,
            values: Vec::new(),
            objective_value: None,
            sensitivity: Vec::new(),
            rebuilt: false,
        };
        let text = solution.to_string();
        assert!(text.starts_with("Status: Unbounded\n"));
        assert!(text.contains("grow without bound"));
        assert!(!text.contains("Objective value"));
    }

    #[test]
    fn test_rebuilt_infeasible_report() {
        let solution = Solution {
            status: Status::Infeasible,
            values: Vec::new(),
            objective_value: None,
            sensitivity: Vec::new(),
            rebuilt: true,
        };
        let text = solution.to_string();
        assert!(text.starts_with("Status: Infeasible\n"));
        assert!(text.contains("new constraints made the problem infeasible"));
    }
}
