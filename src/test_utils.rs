pub mod test_helpers {
    use crate::event_source::{Event, KeyCode, KeyModifiers, SimulatedEventSource};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    /// Builder for creating test scenarios with simulated user input
    #[derive(Default)]
    pub struct TestScenarioBuilder {
        events: Vec<Event>,
    }

    impl TestScenarioBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a character key press
        pub fn press_char(mut self, c: char) -> Self {
            self.events.push(SimulatedEventSource::char_key(c));
            self
        }

        pub fn press_key(mut self, code: KeyCode) -> Self {
            self.events
                .push(SimulatedEventSource::key_event(code, KeyModifiers::empty()));
            self
        }

        /// Flip right n times (press 'l' n times)
        pub fn flip_right(mut self, times: usize) -> Self {
            for _ in 0..times {
                self.events.push(SimulatedEventSource::char_key('l'));
            }
            self
        }

        /// Flip left n times (press 'h' n times)
        pub fn flip_left(mut self, times: usize) -> Self {
            for _ in 0..times {
                self.events.push(SimulatedEventSource::char_key('h'));
            }
            self
        }

        /// Left click at a cell
        pub fn click(mut self, column: u16, row: u16) -> Self {
            self.events.push(SimulatedEventSource::mouse_down(column, row));
            self.events.push(SimulatedEventSource::mouse_up(column, row));
            self
        }

        pub fn mouse_down(mut self, column: u16, row: u16) -> Self {
            self.events.push(SimulatedEventSource::mouse_down(column, row));
            self
        }

        pub fn mouse_drag(mut self, column: u16, row: u16) -> Self {
            self.events.push(SimulatedEventSource::mouse_drag(column, row));
            self
        }

        pub fn mouse_up(mut self, column: u16, row: u16) -> Self {
            self.events.push(SimulatedEventSource::mouse_up(column, row));
            self
        }

        /// Press at `from`, drag through each column to `to` on the same row, release
        pub fn drag(mut self, from: u16, to: u16, row: u16) -> Self {
            self.events.push(SimulatedEventSource::mouse_down(from, row));
            let columns: Vec<u16> = if from <= to {
                (from..=to).collect()
            } else {
                (to..=from).rev().collect()
            };
            for column in columns.into_iter().skip(1) {
                self.events.push(SimulatedEventSource::mouse_drag(column, row));
            }
            self.events.push(SimulatedEventSource::mouse_up(to, row));
            self
        }

        /// Quit the application (press 'q')
        pub fn quit(mut self) -> Self {
            self.events.push(SimulatedEventSource::char_key('q'));
            self
        }

        /// Build the simulated event source
        pub fn build(self) -> SimulatedEventSource {
            SimulatedEventSource::new(self.events)
        }
    }

    /// Create a test terminal for snapshot testing
    pub fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).unwrap()
    }

    /// Capture the current terminal buffer as a string
    pub fn capture_terminal_state(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut lines = Vec::new();

        for y in 0..buffer.area.height {
            let mut line = String::new();
            for x in 0..buffer.area.width {
                line.push_str(buffer[(x, y)].symbol());
            }
            // Trim trailing whitespace from each line
            lines.push(line.trim_end().to_string());
        }

        // Remove trailing empty lines
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;

    #[test]
    fn test_scenario_builder() {
        let scenario = TestScenarioBuilder::new()
            .flip_right(2)
            .drag(3, 6, 10)
            .click(1, 1)
            .quit()
            .build();

        // 2 flips, down + 3 drags + up, down + up, quit
        assert_eq!(scenario.events.len(), 2 + 5 + 2 + 1);
    }

    #[test]
    fn test_backwards_drag_ends_at_target() {
        use crate::event_source::{Event, MouseEventKind};

        let scenario = TestScenarioBuilder::new().drag(5, 2, 0).build();
        let Some(Event::Mouse(last_drag)) = scenario.events.get(3) else {
            panic!("expected a mouse event");
        };
        assert!(matches!(last_drag.kind, MouseEventKind::Drag(_)));
        assert_eq!(last_drag.column, 2);
    }
}
