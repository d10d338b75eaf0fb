use super::script::generate_map_block;
use crate::common::{EmitError, EmitResult};
use crate::domains::network::Graph;
use std::io::{BufRead, BufWriter, Write};
use tracing::info;

/// Marker line that separates the hand-written preamble from the postamble.
pub const DEFAULT_SENTINEL: &str = ";;===start";

/// Splices the generated map procedures into a NetLogo template.
///
/// The template is copied byte for byte up to the sentinel line, which is
/// dropped and replaced by the generated block; everything after it is
/// copied byte for byte as well. Templates need not be valid UTF-8.
#[derive(Debug, Clone)]
pub struct NetLogoEmitter {
    sentinel: String,
}

impl Default for NetLogoEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_SENTINEL)
    }
}

/// Line content without its `\n` or `\r\n` terminator.
fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Copies one raw template line, terminating the last one if it was not.
fn push_line(output: &mut Vec<u8>, line: &[u8]) {
    output.extend_from_slice(line);
    if !line.ends_with(b"\n") {
        output.push(b'\n');
    }
}

impl NetLogoEmitter {
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self { sentinel: sentinel.into() }
    }

    /// Produces the full output script in memory.
    pub fn render<R: BufRead>(&self, graph: &Graph, mut template: R) -> EmitResult<Vec<u8>> {
        let mut output = Vec::new();
        let mut line = Vec::new();

        let mut found = false;
        loop {
            line.clear();
            if template.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            if strip_terminator(&line) == self.sentinel.as_bytes() {
                found = true;
                break;
            }
            push_line(&mut output, &line);
        }
        if !found {
            return Err(EmitError::MalformedTemplate { sentinel: self.sentinel.clone() });
        }

        for generated in generate_map_block(graph)? {
            output.extend_from_slice(generated.as_bytes());
            output.push(b'\n');
        }

        loop {
            line.clear();
            if template.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            push_line(&mut output, &line);
        }
        Ok(output)
    }

    /// Renders the script and writes it to `out`.
    ///
    /// Nothing reaches `out` unless rendering succeeded. A write failure can
    /// still leave `out` partially written; callers that need an all-or-nothing
    /// file go through `FileMapWriter`.
    pub fn emit<R: BufRead, W: Write>(&self, graph: &Graph, template: R, out: W) -> EmitResult<()> {
        let script = self.render(graph, template)?;

        let mut out = BufWriter::new(out);
        out.write_all(&script)?;
        out.flush()?;

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            bytes = script.len(),
            "map script emitted"
        );
        Ok(())
    }
}
