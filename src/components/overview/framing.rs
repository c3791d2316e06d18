//! Zoom and pan of the overview, and framing of a target group or node.

use super::config::OverviewConfig;
use super::scale::{Bounds, nonzero_span};
use super::types::DiagramNode;

/// Linear padding applied around a group when it is framed.
pub const GROUP_FRAME_PADDING: f64 = 1.2;
/// Zoom multiplier range used when framing an ungrouped node.
pub const NODE_ZOOM_MIN: f64 = 1.5;
pub const NODE_ZOOM_MAX: f64 = 3.0;

/// World-to-viewport transform of one overview instance.
///
/// A world point `(x, y)` lands at
/// `(padding + pan_x + (x - min_x) * scale, padding + pan_y + (y - min_y) * scale)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
	pub base_scale: f64,
	pub zoom: f64,
	pub pan_x: f64,
	pub pan_y: f64,
}

impl Default for TransformState {
	fn default() -> Self {
		Self::new(1.0)
	}
}

impl TransformState {
	pub fn new(base_scale: f64) -> Self {
		Self {
			base_scale,
			zoom: 1.0,
			pan_x: 0.0,
			pan_y: 0.0,
		}
	}

	/// Effective world-to-viewport scale.
	pub fn scale(&self) -> f64 {
		self.base_scale * self.zoom
	}

	pub fn reset(&mut self) {
		self.zoom = 1.0;
		self.pan_x = 0.0;
		self.pan_y = 0.0;
	}

	pub fn world_to_view(&self, bounds: &Bounds, config: &OverviewConfig, x: f64, y: f64) -> (f64, f64) {
		let k = self.scale();
		(
			config.padding + self.pan_x + (x - bounds.min_x) * k,
			config.padding + self.pan_y + (y - bounds.min_y) * k,
		)
	}

	pub fn view_to_world(&self, bounds: &Bounds, config: &OverviewConfig, vx: f64, vy: f64) -> (f64, f64) {
		let k = self.scale();
		(
			(vx - config.padding - self.pan_x) / k + bounds.min_x,
			(vy - config.padding - self.pan_y) / k + bounds.min_y,
		)
	}

	/// Zooms so `group` fills the viewport with some margin, then centers it.
	///
	/// Never zooms out past the base scale.
	pub fn frame_group(&mut self, bounds: &Bounds, config: &OverviewConfig, group: &DiagramNode) {
		let fit_x = config.available_width() / (nonzero_span(group.width) * GROUP_FRAME_PADDING);
		let fit_y = config.available_height() / (nonzero_span(group.height) * GROUP_FRAME_PADDING);
		let target = fit_x.min(fit_y);
		self.zoom = (target / self.base_scale).max(1.0);
		self.center_on(bounds, config, group.center());
	}

	/// Zooms in by a moderate, bounded amount and centers `node`.
	pub fn frame_node(&mut self, bounds: &Bounds, config: &OverviewConfig, node: &DiagramNode) {
		self.zoom = (1.0 / self.base_scale).clamp(NODE_ZOOM_MIN, NODE_ZOOM_MAX);
		self.center_on(bounds, config, node.center());
	}

	fn center_on(&mut self, bounds: &Bounds, config: &OverviewConfig, (cx, cy): (f64, f64)) {
		let k = self.scale();
		self.pan_x = config.available_width() / 2.0 - (cx - bounds.min_x) * k;
		self.pan_y = config.available_height() / 2.0 - (cy - bounds.min_y) * k;
		self.clamp_pan(bounds, config);
	}

	/// Keeps a diagram that overflows the viewport from leaving gaps at its edges.
	///
	/// Diagrams smaller than the viewport keep their centering pan.
	pub fn clamp_pan(&mut self, bounds: &Bounds, config: &OverviewConfig) {
		let k = self.scale();
		self.pan_x = clamp_axis(self.pan_x, bounds.width() * k, config.available_width());
		self.pan_y = clamp_axis(self.pan_y, bounds.height() * k, config.available_height());
	}
}

fn clamp_axis(pan: f64, scaled: f64, available: f64) -> f64 {
	if scaled >= available {
		pan.clamp(-(scaled - available), 0.0)
	} else {
		pan
	}
}
