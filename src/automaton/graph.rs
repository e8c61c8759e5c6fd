//! GML export of compiled machines, for inspection in graph tools.

use std::fmt::Write;

use super::machine::{Label, StateMachine};
use crate::base::constants::BOUNDARY;

impl StateMachine {
    /// Render every sub-machine as one GML graph.
    ///
    /// Nodes are numbered sequentially across machines and labelled `m{machine}s{state}`.
    pub fn to_gml(&self) -> String {
        let mut out = String::new();
        let mut offsets = Vec::with_capacity(self.machines.len());
        let mut next = 0usize;
        for machine in &self.machines {
            offsets.push(next);
            next += machine.states.len();
        }

        let _ = writeln!(out, "graph [");
        let _ = writeln!(out, "\tdirected 1");
        let _ = writeln!(out, "\tlabel \"{}\"", self.name);
        for (m, machine) in self.machines.iter().enumerate() {
            for (s, state) in machine.states.iter().enumerate() {
                let shape = if state.accepting { "doublecircle" } else { "circle" };
                let _ = writeln!(
                    out,
                    "\tnode [ id {} label \"m{}s{}\" shape \"{}\" ]",
                    offsets[m] + s,
                    m,
                    s,
                    shape
                );
            }
        }
        for (m, machine) in self.machines.iter().enumerate() {
            for (s, state) in machine.states.iter().enumerate() {
                for transition in &state.transitions {
                    let _ = writeln!(
                        out,
                        "\tedge [ source {} target {} label \"{}\" ]",
                        offsets[m] + s,
                        offsets[m] + transition.target,
                        edge_label(&transition.label)
                    );
                }
            }
        }
        out.push_str("]\n");
        out
    }
}

fn edge_label(label: &Label) -> String {
    match label {
        Label::Epsilon => "ε".to_string(),
        Label::Segment(segment) => segment.symbol().to_string(),
        Label::Features(spec) => spec.text().to_string(),
        Label::Class { name, .. } => name.to_string(),
        Label::Boundary => BOUNDARY.to_string(),
        Label::Group(id) => format!("m{id}"),
        Label::Parallel(ids) => {
            let names: Vec<String> = ids.iter().map(|id| format!("m{id}")).collect();
            format!("{{{}}}", names.join(" "))
        }
        Label::Negated { machine, width } => format!("!m{machine}/{width}"),
    }
}
