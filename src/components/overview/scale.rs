//! World-space bounds and the fit-to-viewport base scale.

use super::config::OverviewConfig;
use super::types::DiagramNode;

/// Span used when a document is empty or collapses to zero width/height.
pub const PLACEHOLDER_SPAN: f64 = 100.0;

/// Smallest axis-aligned box enclosing every node, in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub max_x: f64,
	pub min_y: f64,
	pub max_y: f64,
}

impl Default for Bounds {
	fn default() -> Self {
		Self {
			min_x: 0.0,
			max_x: PLACEHOLDER_SPAN,
			min_y: 0.0,
			max_y: PLACEHOLDER_SPAN,
		}
	}
}

impl Bounds {
	/// Bounds of `nodes`, or the placeholder box when there are none.
	pub fn of(nodes: &[DiagramNode]) -> Self {
		let Some(first) = nodes.first() else {
			return Self::default();
		};
		nodes.iter().skip(1).fold(
			Self {
				min_x: first.x,
				max_x: first.right(),
				min_y: first.y,
				max_y: first.bottom(),
			},
			|b, node| Self {
				min_x: b.min_x.min(node.x),
				max_x: b.max_x.max(node.right()),
				min_y: b.min_y.min(node.y),
				max_y: b.max_y.max(node.bottom()),
			},
		)
	}

	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	/// Width usable as a divisor: the placeholder span replaces a zero span.
	pub fn span_x(&self) -> f64 {
		nonzero_span(self.width())
	}

	pub fn span_y(&self) -> f64 {
		nonzero_span(self.height())
	}
}

pub(crate) fn nonzero_span(span: f64) -> f64 {
	if span > 0.0 { span } else { PLACEHOLDER_SPAN }
}

/// Scale that fits `bounds` into the padded viewport, never above 1.
pub fn base_scale(bounds: &Bounds, config: &OverviewConfig) -> f64 {
	let scale_x = config.available_width() / bounds.span_x();
	let scale_y = config.available_height() / bounds.span_y();
	scale_x.min(scale_y).min(1.0)
}
