/// Colours and fonts for the overview surface.
///
/// Owned by the host and handed to the overview at construction; the overview
/// never installs shared styling of its own.
#[derive(Clone, Debug, PartialEq)]
pub struct OverviewStyle {
	pub background: String,
	pub group_fill: String,
	pub group_stroke: String,
	pub active_group_fill: String,
	pub active_group_stroke: String,
	pub group_label: String,
	pub anchor_fill: String,
	pub anchor_stroke: String,
	pub active_anchor_fill: String,
	pub active_anchor_stroke: String,
	pub anchor_label: String,
	pub active_anchor_label: String,
	pub placeholder_text: String,
	pub error_text: String,
	pub font_family: String,
	pub corner_radius: f64,
}

impl Default for OverviewStyle {
	fn default() -> Self {
		Self {
			background: "#1a1a2e".into(),
			group_fill: "rgba(100, 180, 255, 0.08)".into(),
			group_stroke: "rgba(100, 180, 255, 0.35)".into(),
			active_group_fill: "rgba(255, 200, 80, 0.18)".into(),
			active_group_stroke: "rgba(255, 200, 80, 0.9)".into(),
			group_label: "rgba(255, 255, 255, 0.6)".into(),
			anchor_fill: "#2c3e66".into(),
			anchor_stroke: "rgba(100, 180, 255, 0.6)".into(),
			active_anchor_fill: "#ff7f0e".into(),
			active_anchor_stroke: "white".into(),
			anchor_label: "rgba(255, 255, 255, 0.8)".into(),
			active_anchor_label: "white".into(),
			placeholder_text: "rgba(255, 255, 255, 0.6)".into(),
			error_text: "#d62728".into(),
			font_family: "sans-serif".into(),
			corner_radius: 3.0,
		}
	}
}

/// Logical viewport size, padding and styling of one overview instance.
#[derive(Clone, Debug, PartialEq)]
pub struct OverviewConfig {
	pub width: f64,
	pub height: f64,
	/// Margin kept free on every side of the drawn diagram.
	pub padding: f64,
	pub style: OverviewStyle,
}

impl Default for OverviewConfig {
	fn default() -> Self {
		Self {
			width: 500.0,
			height: 600.0,
			padding: 20.0,
			style: OverviewStyle::default(),
		}
	}
}

impl OverviewConfig {
	pub fn available_width(&self) -> f64 {
		(self.width - 2.0 * self.padding).max(0.0)
	}

	pub fn available_height(&self) -> f64 {
		(self.height - 2.0 * self.padding).max(0.0)
	}
}
