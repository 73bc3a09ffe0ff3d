use std::fmt;

use glam::{DAffine2, DVec2};
use once_cell::sync::Lazy;
use regex::Regex;
use toothmap_svg::SvgDocument;

static MATRIX_FN: Lazy<Regex> = Lazy::new(|| Regex::new(r"matrix\s*\(").unwrap());

// Plain decimals only; an exponent splits into two numbers
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?[\d.]+").unwrap());

/// SVG `matrix(a, b, c, d, e, f)`:
/// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform(DAffine2);

impl AffineTransform {
    pub const IDENTITY: Self = Self(DAffine2::IDENTITY);

    pub fn from_coefficients(coefficients: [f64; 6]) -> Self {
        // SVG lists the matrix column-major, same as glam
        Self(DAffine2::from_cols_array(&coefficients))
    }

    pub fn coefficients(&self) -> [f64; 6] {
        self.0.to_cols_array()
    }

    pub fn map(&self, point: DVec2) -> DVec2 {
        self.0.transform_point2(point)
    }

    /// Parse a `transform` attribute value.
    ///
    /// The value must name a `matrix(...)` and contain exactly six numbers in
    /// total; anything else (other transform functions mixed in, missing
    /// components) is rejected rather than partially applied.
    pub fn parse_matrix(value: &str) -> Option<Self> {
        if !MATRIX_FN.is_match(value) {
            return None;
        }

        let numbers: Vec<f64> = NUMBER
            .find_iter(value)
            .map(|m| m.as_str().parse::<f64>())
            .collect::<Result<_, _>>()
            .ok()?;
        let coefficients: [f64; 6] = numbers.try_into().ok()?;
        Some(Self::from_coefficients(coefficients))
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for AffineTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.coefficients();
        write!(f, "matrix({a}, {b}, {c}, {d}, {e}, {g})")
    }
}

/// First `<g transform="matrix(...)">` in document order.
pub fn locate_transform(doc: &SvgDocument) -> Option<AffineTransform> {
    doc.find_svg_elements("g").into_iter().find_map(|id| {
        let value = doc.element(id)?.attr("transform")?;
        let transform = AffineTransform::parse_matrix(value);
        if transform.is_none() {
            log::debug!("Ignoring group transform {value:?}");
        }
        transform
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: DVec2, expected: DVec2) {
        assert!(
            (actual - expected).length() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_map_applies_svg_matrix() {
        let transform = AffineTransform::from_coefficients([0.1, 0.0, 0.0, -0.1, 13.46, 237.46]);
        assert_close(
            transform.map(DVec2::new(100.0, 200.0)),
            DVec2::new(23.46, 217.46),
        );
    }

    #[test]
    fn test_map_uses_off_diagonal_terms() {
        // x' = 1x + 3y + 5, y' = 2x + 4y + 6
        let transform = AffineTransform::from_coefficients([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_close(transform.map(DVec2::new(1.0, 1.0)), DVec2::new(9.0, 12.0));
    }

    #[test]
    fn test_identity_is_default() {
        let point = DVec2::new(-4.5, 7.25);
        assert_eq!(AffineTransform::default().map(point), point);
        assert_eq!(
            AffineTransform::IDENTITY.coefficients(),
            [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_parse_matrix() {
        let parsed = AffineTransform::parse_matrix("matrix(0.1,0,0,-0.1,13.464695,237.4629)").unwrap();
        assert_eq!(
            parsed.coefficients(),
            [0.1, 0.0, 0.0, -0.1, 13.464695, 237.4629]
        );

        let spaced = AffineTransform::parse_matrix("matrix( 1 0 0 1 -25 .5 )").unwrap();
        assert_eq!(spaced.coefficients(), [1.0, 0.0, 0.0, 1.0, -25.0, 0.5]);
    }

    #[test]
    fn test_parse_matrix_rejects_other_shapes() {
        assert_eq!(AffineTransform::parse_matrix("translate(10,20)"), None);
        assert_eq!(AffineTransform::parse_matrix("matrix(1,0,0,1,0)"), None);
        assert_eq!(
            AffineTransform::parse_matrix("translate(5,5) matrix(1,0,0,1,0,0)"),
            None
        );
        assert_eq!(AffineTransform::parse_matrix(""), None);
    }

    #[test]
    fn test_parse_matrix_rejects_exponents() {
        // "1e-3" reads as the two numbers 1 and -3, giving seven in total
        assert_eq!(AffineTransform::parse_matrix("matrix(1e-3,0,0,1,0,0)"), None);
        // A leading plus is not part of the number
        let plus = AffineTransform::parse_matrix("matrix(+1,0,0,1,0,0)").unwrap();
        assert_eq!(plus.coefficients(), [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_locate_transform_takes_first_matrix_group() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg">
  <g transform="translate(1,1)"/>
  <g><g transform="matrix(2,0,0,2,0,0)"/></g>
  <g transform="matrix(3,0,0,3,0,0)"/>
</svg>"#,
        )
        .unwrap();
        let transform = locate_transform(&doc).unwrap();
        assert_eq!(transform.coefficients(), [2.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_locate_transform_missing() {
        let doc = SvgDocument::parse(r#"<svg xmlns="http://www.w3.org/2000/svg"><g/></svg>"#).unwrap();
        assert_eq!(locate_transform(&doc), None);
    }

    #[test]
    fn test_display() {
        let transform = AffineTransform::from_coefficients([0.1, 0.0, 0.0, -0.1, 13.5, 237.5]);
        assert_eq!(transform.to_string(), "matrix(0.1, 0, 0, -0.1, 13.5, 237.5)");
    }
}
