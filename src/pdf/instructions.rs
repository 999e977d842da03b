//! Text-placement operator synthesis
//!
//! Every placement is emitted as its own `BT ... ET` text object so it does
//! not depend on text state left behind by neighbouring operators.

use lopdf::content::Operation;
use lopdf::Object;
use crate::font::StandardFont;

/// A request to draw one string at a fixed position
///
/// Coordinates are PDF points measured from the bottom-left corner of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    /// Text to show; passed through without checking the font's encoding
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// Font size in points
    pub size: f32,
    pub font: StandardFont,
}

impl TextPlacement {
    /// Build the operators for this placement, selecting the font by `font_resource`
    pub fn to_operations(&self, font_resource: &str) -> Vec<Operation> {
        text_operations(&self.text, self.x, self.y, self.size, font_resource)
    }
}

/// Build the operator sequence that shows `text` at `(x, y)`
///
/// The result is always `BT`, `Tf`, `Tm`, `Tj`, `ET`. The text matrix is an
/// unrotated, unscaled translation to `(x, y)`.
///
/// lopdf stores real operands as `f32`, so `x` and `y` are narrowed when
/// written. On pages up to the 14,400 pt maximum the error stays below a
/// thousandth of a point.
pub fn text_operations(text: &str, x: f64, y: f64, size: f32, font_resource: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![
                Object::Name(font_resource.as_bytes().to_vec()),
                Object::Real(size),
            ],
        ),
        Operation::new(
            "Tm",
            vec![
                Object::Integer(1),
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(1),
                Object::Real(x as f32),
                Object::Real(y as f32),
            ],
        ),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operators(ops: &[Operation]) -> Vec<&str> {
        ops.iter().map(|op| op.operator.as_str()).collect()
    }

    #[test]
    fn test_text_operations_order() {
        let ops = text_operations("Hello", 72.0, 720.0, 11.0, "Times-Roman");
        assert_eq!(operators(&ops), vec!["BT", "Tf", "Tm", "Tj", "ET"]);
        assert!(ops[0].operands.is_empty());
        assert!(ops[4].operands.is_empty());
    }

    #[test]
    fn test_font_selection_operands() {
        let ops = text_operations("Hello", 0.0, 0.0, 14.5, "Helvetica-Bold");
        let tf = &ops[1].operands;
        assert_eq!(tf.len(), 2);
        assert_eq!(tf[0].as_name().unwrap(), b"Helvetica-Bold");
        assert_eq!(tf[1].as_float().unwrap(), 14.5);
    }

    #[test]
    fn test_text_matrix_is_translation() {
        let ops = text_operations("Hello", 72.0, 720.0, 11.0, "Times-Roman");
        let values: Vec<f32> = ops[2].operands.iter().map(|o| o.as_float().unwrap()).collect();
        assert_eq!(values, vec![1.0, 0.0, 0.0, 1.0, 72.0, 720.0]);
    }

    #[test]
    fn test_show_string_is_passed_through() {
        let ops = text_operations("(a) \\ b", 0.0, 0.0, 11.0, "Courier");
        assert_eq!(ops[3].operands[0].as_str().unwrap(), b"(a) \\ b");
    }

    #[test]
    fn test_placement_uses_given_resource_name() {
        let placement = TextPlacement {
            text: "Total".to_string(),
            x: 10.0,
            y: 20.0,
            size: 9.0,
            font: StandardFont::CourierBold,
        };
        let ops = placement.to_operations(placement.font.resource_name());
        assert_eq!(ops[1].operands[0].as_name().unwrap(), b"Courier-Bold");
        assert_eq!(ops[3].operands[0].as_str().unwrap(), b"Total");
    }
}
