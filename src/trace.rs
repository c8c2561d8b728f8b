use std::collections::VecDeque;

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
    pub(crate) forward: bool,
}

impl TraceState {
    pub(crate) fn new(log_limit: usize) -> Self {
        Self {
            enabled: false,
            events: true,
            logs: VecDeque::new(),
            log_limit,
            forward: true,
        }
    }

    pub(crate) fn event_line(&mut self, line: String) {
        if self.enabled && self.events {
            self.line(line);
        }
    }

    pub(crate) fn line(&mut self, line: String) {
        if !self.enabled {
            return;
        }
        if self.forward {
            tracing::debug!(target: "dhtml_layers", "{line}");
        }
        while self.logs.len() >= self.log_limit {
            self.logs.pop_front();
        }
        self.logs.push_back(line);
    }

    pub(crate) fn set_limit(&mut self, max_entries: usize) {
        self.log_limit = max_entries;
        while self.logs.len() > self.log_limit {
            self.logs.pop_front();
        }
    }

    pub(crate) fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs).into_iter().collect()
    }
}
