// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction messages delivered to figures.

use core::str::FromStr;

use figkit_core::MarkId;
use kurbo::Point;
use thiserror::Error;

/// A user interaction, addressed to the figure that owns the region or control.
#[derive(Clone, Debug, PartialEq)]
pub enum FigureEvent {
    /// The pointer entered a mark.
    Hover {
        /// The panel holding the mark.
        region: String,
        /// The hovered mark.
        target: MarkId,
    },
    /// The pointer moved to a position inside a panel; the figure resolves it to a mark.
    Pointer {
        /// The panel.
        region: String,
        /// Position in panel coordinates.
        point: Point,
    },
    /// The pointer left a panel.
    Leave {
        /// The panel.
        region: String,
    },
    /// A dropdown changed.
    Select {
        /// The control id, e.g. `mixture-comet`.
        control: String,
        /// The chosen option value.
        option: String,
    },
}

/// An event scripted on the command line, before its mark key is resolved to a [`MarkId`].
///
/// The syntax is `<figure>:<kind>:<arg>`:
/// - `fig03:hover:swarm=B1-comet`
/// - `fig03:pointer:swarm=120,80`
/// - `fig08:leave:matrix`
/// - `fig04:select:mixture-comet=B`
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedEvent {
    /// Target figure id.
    pub figure: String,
    /// What happens.
    pub action: ScriptedAction,
}

/// The action of a [`ScriptedEvent`].
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptedAction {
    /// Hover the mark bound to `key` in `region`.
    Hover {
        /// The panel.
        region: String,
        /// Key of the bound record.
        key: String,
    },
    /// Move the pointer to `point` in `region`.
    Pointer {
        /// The panel.
        region: String,
        /// Panel coordinates.
        point: Point,
    },
    /// Leave `region`.
    Leave {
        /// The panel.
        region: String,
    },
    /// Choose `option` in `control`.
    Select {
        /// The control id.
        control: String,
        /// The option value.
        option: String,
    },
}

/// A scripted event that does not follow `<figure>:<kind>:<arg>`.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("invalid event `{input}`: {reason}")]
pub struct EventParseError {
    /// The rejected input.
    pub input: String,
    /// What is wrong with it.
    pub reason: &'static str,
}

impl FromStr for ScriptedEvent {
    type Err = EventParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason| EventParseError {
            input: s.to_owned(),
            reason,
        };
        let mut parts = s.splitn(3, ':');
        let (Some(figure), Some(kind), Some(arg)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(fail("expected <figure>:<kind>:<arg>"));
        };
        if figure.is_empty() {
            return Err(fail("empty figure id"));
        }
        let pair = || arg.split_once('=').ok_or_else(|| fail("expected <name>=<value>"));
        let action = match kind {
            "hover" => {
                let (region, key) = pair()?;
                ScriptedAction::Hover {
                    region: region.to_owned(),
                    key: key.to_owned(),
                }
            }
            "pointer" => {
                let (region, xy) = pair()?;
                let (x, y) = xy.split_once(',').ok_or_else(|| fail("expected <x>,<y>"))?;
                let coord = |v: &str| v.trim().parse::<f64>().map_err(|_| fail("bad coordinate"));
                ScriptedAction::Pointer {
                    region: region.to_owned(),
                    point: Point::new(coord(x)?, coord(y)?),
                }
            }
            "leave" => ScriptedAction::Leave {
                region: arg.to_owned(),
            },
            "select" => {
                let (control, option) = pair()?;
                ScriptedAction::Select {
                    control: control.to_owned(),
                    option: option.to_owned(),
                }
            }
            _ => return Err(fail("kind must be hover, pointer, leave or select")),
        };
        Ok(Self {
            figure: figure.to_owned(),
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn parses_every_kind() {
        let hover: ScriptedEvent = "fig03:hover:swarm=B1-comet".parse().expect("hover");
        assert_eq!(
            hover.action,
            ScriptedAction::Hover {
                region: "swarm".into(),
                key: "B1-comet".into()
            },
            "key keeps its dash"
        );
        let pointer: ScriptedEvent = "fig07:pointer:swarm=120.5, 80".parse().expect("pointer");
        assert_eq!(
            pointer.action,
            ScriptedAction::Pointer {
                region: "swarm".into(),
                point: Point::new(120.5, 80.0)
            },
            "coordinates"
        );
        let select: ScriptedEvent = "fig04:select:mixture-comet=B".parse().expect("select");
        assert_eq!(select.figure, "fig04", "figure id");
        assert!(
            matches!("fig08:leave:matrix".parse::<ScriptedEvent>(), Ok(ScriptedEvent {
                action: ScriptedAction::Leave { .. },
                ..
            })),
            "leave"
        );
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["fig03", "fig03:hover:swarm", "fig03:drag:a=b", ":hover:a=b", "f:pointer:a=1"] {
            assert!(bad.parse::<ScriptedEvent>().is_err(), "{bad}");
        }
    }
}
