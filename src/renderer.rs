//! Turns an icon size into an ordered list of drawing primitives.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::layout::{BoundingBox, IconSpec, Point};
use crate::theme::{Color, IconTheme};

/// Start angle of the highlight arc, in degrees clockwise from east.
pub const HIGHLIGHT_START_DEGREES: f32 = 300.0;

/// End angle of the highlight arc. Smaller than the start, so the arc wraps
/// through 0 degrees.
pub const HIGHLIGHT_END_DEGREES: f32 = 60.0;

/// A single drawing primitive.
///
/// Commands are painted in order; later commands cover earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    /// Fill a half-open rectangle.
    FillCanvas { rect: BoundingBox, color: Color },

    /// Fill the ellipse inscribed in an inclusive bounding box.
    FillEllipse { bbox: BoundingBox, color: Color },

    /// Stroke a straight segment between two pixel centers.
    DrawLine {
        from: Point,
        to: Point,
        color: Color,
        width: u32,
    },

    /// Stroke part of the ellipse inscribed in an inclusive bounding box.
    ///
    /// Angles are degrees clockwise from east. `end_angle < start_angle`
    /// wraps through 0.
    #[serde(rename_all = "camelCase")]
    DrawArc {
        bbox: BoundingBox,
        start_angle: f32,
        end_angle: f32,
        color: Color,
        width: u32,
    },
}

/// Produces the draw commands for the reticle icon.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IconRenderer {
    theme: IconTheme,
}

impl IconRenderer {
    pub fn new(theme: IconTheme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &IconTheme {
        &self.theme
    }

    /// Returns the commands for an icon of `size` pixels, in paint order.
    pub fn render(&self, size: NonZeroU32) -> Vec<DrawCommand> {
        self.render_spec(&IconSpec::new(size))
    }

    /// Returns the commands for an already computed layout.
    pub fn render_spec(&self, spec: &IconSpec) -> Vec<DrawCommand> {
        let theme = &self.theme;
        let size = i64::from(spec.size);
        let (h_from, h_to) = spec.horizontal_crosshair();
        let (v_from, v_to) = spec.vertical_crosshair();

        vec![
            DrawCommand::FillCanvas {
                rect: BoundingBox::new(0, 0, size, size),
                color: theme.background,
            },
            DrawCommand::FillEllipse {
                bbox: spec.outer_bbox(),
                color: theme.outer_disk,
            },
            DrawCommand::FillEllipse {
                bbox: spec.inner_bbox(),
                color: theme.inner_core,
            },
            DrawCommand::DrawLine {
                from: h_from,
                to: h_to,
                color: theme.crosshair,
                width: spec.crosshair_line_width,
            },
            DrawCommand::DrawLine {
                from: v_from,
                to: v_to,
                color: theme.crosshair,
                width: spec.crosshair_line_width,
            },
            DrawCommand::DrawArc {
                bbox: spec.arc_bbox(),
                start_angle: HIGHLIGHT_START_DEGREES,
                end_angle: HIGHLIGHT_END_DEGREES,
                color: theme.highlight,
                width: spec.arc_line_width,
            },
        ]
    }
}

/// Renders `size` with the default theme.
pub fn render(size: NonZeroU32) -> Vec<DrawCommand> {
    IconRenderer::default().render(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::DEFAULT_SIZES;

    fn nz(size: u32) -> NonZeroU32 {
        NonZeroU32::new(size).unwrap()
    }

    #[test]
    fn size_32_commands() {
        let theme = IconTheme::default();
        let commands = render(nz(32));
        assert_eq!(commands.len(), 6);

        assert_eq!(
            commands[0],
            DrawCommand::FillCanvas {
                rect: BoundingBox::new(0, 0, 32, 32),
                color: theme.background,
            }
        );
        assert_eq!(
            commands[1],
            DrawCommand::FillEllipse {
                bbox: BoundingBox::new(3, 3, 29, 29),
                color: theme.outer_disk,
            }
        );
        assert_eq!(
            commands[2],
            DrawCommand::FillEllipse {
                bbox: BoundingBox::new(10, 10, 22, 22),
                color: theme.inner_core,
            }
        );
        assert_eq!(
            commands[3],
            DrawCommand::DrawLine {
                from: Point::new(8, 16),
                to: Point::new(24, 16),
                color: theme.crosshair,
                width: 2,
            }
        );
        assert_eq!(
            commands[4],
            DrawCommand::DrawLine {
                from: Point::new(16, 8),
                to: Point::new(16, 24),
                color: theme.crosshair,
                width: 2,
            }
        );
        assert_eq!(
            commands[5],
            DrawCommand::DrawArc {
                bbox: BoundingBox::new(5, 5, 27, 27),
                start_angle: 300.0,
                end_angle: 60.0,
                color: theme.highlight,
                width: 1,
            }
        );
    }

    #[test]
    fn render_is_deterministic() {
        for size in DEFAULT_SIZES {
            assert_eq!(render(nz(size)), render(nz(size)));
        }
    }

    #[test]
    fn huge_sizes_still_render() {
        let commands = render(nz(3_000_000_000));
        assert_eq!(commands.len(), 6);
        assert_eq!(
            commands[0],
            DrawCommand::FillCanvas {
                rect: BoundingBox::new(0, 0, 3_000_000_000, 3_000_000_000),
                color: IconTheme::default().background,
            }
        );
        match commands[1] {
            DrawCommand::FillEllipse { bbox, .. } => {
                assert_eq!(bbox.as_array(), [240_000_000, 240_000_000, 2_760_000_000, 2_760_000_000]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn theme_flows_into_commands() {
        let theme = IconTheme::default().hue_rotated(180.0);
        let commands = IconRenderer::new(theme).render(nz(16));
        match commands[1] {
            DrawCommand::FillEllipse { color, .. } => assert_eq!(color, theme.outer_disk),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn commands_serialize_with_op_tag() {
        let json = serde_json::to_string(&render(nz(16))).unwrap();
        assert!(json.contains(r#""op":"fillCanvas""#));
        assert!(json.contains(r#""op":"drawArc""#));
        assert!(json.contains(r#""startAngle":300.0"#));
    }
}
