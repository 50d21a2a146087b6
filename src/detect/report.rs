use super::{Incident, Report};

/// Rank incidents by confidence, highest first. The sort is stable, so
/// equal-confidence incidents keep their input order.
pub fn aggregate(mut incidents: Vec<Incident>) -> Report {
    incidents.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    Report { incidents }
}

impl Incident {
    /// Percentage confidence, rounded for display.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }

    /// Human-readable summary block for this incident.
    pub fn summary(&self) -> String {
        format!(
            "[{:>3}%] {} appears to have copied {}\n  original {}: {}\n  copy     {}: {}",
            self.confidence_percent(),
            self.copy.author.display(),
            self.original.author.display(),
            self.original.created_at.format("%Y-%m-%d %H:%M UTC"),
            self.original.text,
            self.copy.created_at.format("%Y-%m-%d %H:%M UTC"),
            self.copy.text,
        )
    }
}

impl Report {
    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// Numbered summary blocks in rank order.
    pub fn render(&self) -> String {
        self.incidents
            .iter()
            .enumerate()
            .map(|(i, incident)| format!("{}. {}", i + 1, incident.summary()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
