//! Structure-to-text builder.
//!
//! Turns an ordered block sequence into the calendar's plain-text workout
//! format: a capitalized header for every contiguous run of one phase,
//! followed by one `- {duration} {target}` line per block.
//!
//! ```text
//! Warmup
//! - 10m 5:30/km pace
//!
//! Interval
//! - 5m 4:06/km pace Threshold
//! ```

use crate::format::{check_duration, format_duration};
use crate::resolve::{ResolvedTarget, TargetResolution};
use crate::types::{check_header, check_single_line};
use crate::{BlockTarget, Error, Phase, Result, WorkoutBlock};

/// Render blocks into builder text.
///
/// Block order is preserved exactly. Non-adjacent runs of the same phase
/// each get their own header. A block with more than one rep becomes its
/// own repeat set (`Interval 4x`). Any bad block fails the whole render.
pub fn render(blocks: &[WorkoutBlock], resolution: &TargetResolution) -> Result<String> {
    let mut lines: Vec<String> = Vec::with_capacity(blocks.len() * 2);
    let mut current_group: Option<&Phase> = None;

    for (index, block) in blocks.iter().enumerate() {
        let target = describe_target(index, block, resolution)?;

        let reps = block.repeat_count();
        if reps > 1 {
            push_header(&mut lines, format!("{} {}x", block.phase.header(), reps));
            // A repeat set never absorbs the blocks that follow it
            current_group = None;
        } else if current_group != Some(&block.phase) {
            push_header(&mut lines, block.phase.header());
            current_group = Some(&block.phase);
        }

        lines.push(step_line(block, &target));
    }

    tracing::debug!("Rendered {} blocks into {} lines", blocks.len(), lines.len());
    Ok(lines.join("\n").trim_end().to_string())
}

fn push_header(lines: &mut Vec<String>, header: String) {
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(header);
}

fn describe_target(
    index: usize,
    block: &WorkoutBlock,
    resolution: &TargetResolution,
) -> Result<ResolvedTarget> {
    check_duration(index, block.duration_minutes)?;
    if let Phase::Other(name) = &block.phase {
        check_header(name.trim()).map_err(|e| Error::Schema(format!("block {}: {}", index, e)))?;
    }
    if let Some(label) = &block.label {
        check_single_line(&format!("block {} label", index), label)?;
    }

    if let BlockTarget::Explicit(explicit) = &block.target {
        if explicit.value.trim().is_empty() {
            return Err(Error::MissingTarget { index });
        }
        check_single_line(&format!("block {} target", index), &explicit.value)?;
    }

    resolution.resolve(&block.target)
}

fn step_line(block: &WorkoutBlock, target: &ResolvedTarget) -> String {
    let mut line = format!("- {} {}", format_duration(block.duration_minutes), target);
    if let Some(label) = block.label.as_deref().map(str::trim) {
        if !label.is_empty() {
            line.push(' ');
            line.push_str(label);
        }
    }
    line
}

/// A header and the step lines beneath it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub header: String,
    pub lines: Vec<String>,
}

/// Split builder text back into sections.
///
/// Step lines start with `- `; any other non-blank line opens a new
/// section. Steps appearing before the first header land in a section with
/// an empty header.
pub fn sections(text: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with("- ") {
            match sections.last_mut() {
                Some(section) => section.lines.push(line.to_string()),
                None => sections.push(Section {
                    header: String::new(),
                    lines: vec![line.to_string()],
                }),
            }
        } else {
            sections.push(Section {
                header: line.to_string(),
                lines: Vec::new(),
            });
        }
    }

    sections
}
