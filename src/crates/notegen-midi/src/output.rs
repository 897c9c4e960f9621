use notegen_core::Event;

/// Formats converted events for display or hand-off to other tools
pub struct OutputFormatter {
    precision: usize,
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl OutputFormatter {
    /// `precision` is the number of decimals printed for offsets
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    /// Build JSON output of the events
    pub fn json(&self, events: &[Event]) -> serde_json::Result<String> {
        #[derive(serde::Serialize)]
        struct JsonOutput<'a> {
            count: usize,
            events: &'a [Event],
        }

        serde_json::to_string_pretty(&JsonOutput {
            count: events.len(),
            events,
        })
    }

    /// One line per event: offset, instrument, pitch content
    pub fn text(&self, events: &[Event]) -> String {
        events
            .iter()
            .map(|event| self.line(event))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn line(&self, event: &Event) -> String {
        let instrument = event.instrument().map_or("-", |i| i.name);
        format!(
            "{:.*} {} {}",
            self.precision,
            event.offset(),
            instrument,
            event
        )
    }
}
