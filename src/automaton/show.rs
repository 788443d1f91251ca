use itertools::Itertools;
use owo_colors::OwoColorize;

use crate::prelude::*;

impl Automaton {
    fn state_label(&self, state: State) -> String {
        let mut label = state.show();
        if self.initial() == Some(state) {
            label = format!("→{label}");
        }
        if self.finals().contains(&state) {
            format!("{label}*").green().to_string()
        } else {
            label
        }
    }

    fn cell(&self, state: State, symbol: Symbol) -> String {
        match self.table() {
            TransitionTable::Deterministic(table) => symbol
                .as_char()
                .and_then(|c| table.transition(state, c))
                .map(|q| q.show())
                .unwrap_or_else(|| "-".to_string()),
            TransitionTable::Nondeterministic(table) => {
                let targets = table.transition(state, symbol);
                if targets.is_empty() {
                    "-".to_string()
                } else {
                    format!(
                        "{{{}}}",
                        targets.into_iter().sorted().map(|q| q.show()).join(", ")
                    )
                }
            }
        }
    }
}

impl Show for Automaton {
    /// Renders the transition table, one row per state in the order of ordinals. The initial
    /// state is marked with `→`, final states with `*`.
    fn show(&self) -> String {
        let mut columns = self.symbols().universe().map(Symbol::Char).collect_vec();
        if self.table().edges().any(|(_, symbol, _)| symbol.is_epsilon()) {
            columns.push(EPSILON);
        }

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".bold().to_string())
                .chain(columns.iter().map(|symbol| symbol.show().bold().to_string())),
        );
        for state in self.states().iter().copied().sorted() {
            builder.push_record(
                std::iter::once(self.state_label(state))
                    .chain(columns.iter().map(|symbol| self.cell(state, *symbol))),
            );
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}
