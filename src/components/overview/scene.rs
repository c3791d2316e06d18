//! Draw list and click targets for one frame of the overview.
//!
//! A scene is rebuilt from scratch on every render. Nothing is diffed or
//! patched; the previous scene, including its hit regions, is simply dropped.

use log::warn;

use super::config::OverviewConfig;
use super::error::MultipleGroupMembershipError;
use super::framing::TransformState;
use super::groups::group_of_station;
use super::scale::Bounds;
use super::types::{DiagramDocument, DiagramNode, StationId};

const GROUP_LABEL_PX: f64 = 11.0;
const GROUP_LABEL_INSET: f64 = 4.0;
const ANCHOR_LABEL_MIN_PX: f64 = 6.0;
const ANCHOR_LABEL_MAX_PX: f64 = 14.0;

/// Axis-aligned rectangle in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewRect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl ViewRect {
	pub fn contains(&self, px: f64, py: f64) -> bool {
		px >= self.x && py >= self.y && px <= self.x + self.width && py <= self.y + self.height
	}

	pub fn center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
	Start,
	Center,
}

/// A single drawing instruction, already in viewport space.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
	Rect {
		rect: ViewRect,
		fill: String,
		stroke: String,
		line_width: f64,
		radius: f64,
		dashed: bool,
	},
	Label {
		text: String,
		x: f64,
		y: f64,
		font_px: f64,
		color: String,
		align: TextAlign,
	},
}

/// Screen area that reports a click on a station.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitRegion {
	pub station: StationId,
	pub rect: ViewRect,
}

/// What the overview wants painted, plus where it accepts clicks.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
	pub width: f64,
	pub height: f64,
	pub background: String,
	pub primitives: Vec<Primitive>,
	pub hit_regions: Vec<HitRegion>,
	/// Set when group highlighting was skipped because of a membership conflict.
	pub group_error: Option<MultipleGroupMembershipError>,
}

impl Scene {
	/// A blank surface of the configured size.
	pub fn empty(config: &OverviewConfig) -> Self {
		Self {
			width: config.width,
			height: config.height,
			background: config.style.background.clone(),
			primitives: Vec::new(),
			hit_regions: Vec::new(),
			group_error: None,
		}
	}

	/// A surface showing only a centered message.
	pub fn placeholder(config: &OverviewConfig, message: &str, color: &str) -> Self {
		let mut scene = Self::empty(config);
		scene.primitives.push(Primitive::Label {
			text: message.to_owned(),
			x: config.width / 2.0,
			y: config.height / 2.0,
			font_px: 14.0,
			color: color.to_owned(),
			align: TextAlign::Center,
		});
		scene
	}

	/// Draws groups, then station anchors, under `transform`.
	pub fn build(
		document: &DiagramDocument,
		bounds: &Bounds,
		transform: &TransformState,
		config: &OverviewConfig,
		highlight: Option<StationId>,
	) -> Self {
		let style = &config.style;
		let mut scene = Self::empty(config);
		let to_view = |node: &DiagramNode| {
			let (x, y) = transform.world_to_view(bounds, config, node.x, node.y);
			let k = transform.scale();
			ViewRect {
				x,
				y,
				width: node.width * k,
				height: node.height * k,
			}
		};

		let active_group = match highlight.map(|id| group_of_station(document, id)) {
			Some(Ok(group)) => group.map(|g| g.id.as_str()),
			Some(Err(err)) => {
				warn!("rendering without group highlight: {err}");
				scene.group_error = Some(err);
				None
			}
			None => None,
		};

		for group in document.groups() {
			let active = active_group == Some(group.id.as_str());
			let rect = to_view(group);
			scene.primitives.push(Primitive::Rect {
				rect,
				fill: if active { &style.active_group_fill } else { &style.group_fill }.clone(),
				stroke: if active { &style.active_group_stroke } else { &style.group_stroke }.clone(),
				line_width: if active { 2.0 } else { 1.0 },
				radius: style.corner_radius,
				dashed: !active,
			});
			if let Some(label) = group.label.as_deref().filter(|l| !l.is_empty()) {
				scene.primitives.push(Primitive::Label {
					text: label.to_owned(),
					x: rect.x + GROUP_LABEL_INSET,
					y: rect.y + GROUP_LABEL_INSET + GROUP_LABEL_PX / 2.0,
					font_px: GROUP_LABEL_PX,
					color: style.group_label.clone(),
					align: TextAlign::Start,
				});
			}
		}

		for (station, node) in document.anchors() {
			let active = highlight == Some(station);
			let rect = to_view(node);
			let (cx, cy) = rect.center();
			scene.primitives.push(Primitive::Rect {
				rect,
				fill: if active { &style.active_anchor_fill } else { &style.anchor_fill }.clone(),
				stroke: if active { &style.active_anchor_stroke } else { &style.anchor_stroke }.clone(),
				line_width: if active { 2.0 } else { 1.0 },
				radius: style.corner_radius,
				dashed: false,
			});
			scene.primitives.push(Primitive::Label {
				text: station.to_string(),
				x: cx,
				y: cy,
				font_px: (rect.height * 0.5).clamp(ANCHOR_LABEL_MIN_PX, ANCHOR_LABEL_MAX_PX),
				color: if active { &style.active_anchor_label } else { &style.anchor_label }.clone(),
				align: TextAlign::Center,
			});
			scene.hit_regions.push(HitRegion { station, rect });
		}

		scene
	}

	/// Station under the viewport point, preferring the one drawn last.
	pub fn station_at(&self, x: f64, y: f64) -> Option<StationId> {
		self.hit_regions
			.iter()
			.rev()
			.find(|region| region.rect.contains(x, y))
			.map(|region| region.station)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::overview::scale::base_scale;

	fn room_document() -> DiagramDocument {
		DiagramDocument::new(vec![
			DiagramNode::text("n9", "9", 600.0, 400.0, 40.0, 40.0),
			DiagramNode::group("g", Some("Room A"), 0.0, 0.0, 400.0, 300.0),
			DiagramNode::text("n7", "7", 50.0, 50.0, 40.0, 40.0),
			DiagramNode::text("note", "hello", 10.0, 10.0, 40.0, 40.0),
			DiagramNode::new("f", crate::components::overview::types::NodeKind::File, 100.0, 100.0, 40.0, 40.0),
		])
	}

	fn build(doc: &DiagramDocument, highlight: Option<StationId>) -> Scene {
		let config = OverviewConfig::default();
		let bounds = Bounds::of(&doc.nodes);
		let transform = TransformState::new(base_scale(&bounds, &config));
		Scene::build(doc, &bounds, &transform, &config, highlight)
	}

	fn rect_fills(scene: &Scene) -> Vec<&str> {
		scene
			.primitives
			.iter()
			.filter_map(|p| match p {
				Primitive::Rect { fill, .. } => Some(fill.as_str()),
				Primitive::Label { .. } => None,
			})
			.collect()
	}

	#[test]
	fn groups_draw_before_anchors_and_scaffolding_is_skipped() {
		let scene = build(&room_document(), None);
		let style = OverviewConfig::default().style;
		assert_eq!(
			rect_fills(&scene),
			vec![
				style.group_fill.as_str(),
				style.anchor_fill.as_str(),
				style.anchor_fill.as_str()
			]
		);
		let stations: Vec<_> = scene.hit_regions.iter().map(|r| r.station).collect();
		assert_eq!(stations, vec![9, 7]);
	}

	#[test]
	fn highlight_tints_anchor_and_its_group() {
		let scene = build(&room_document(), Some(7));
		let style = OverviewConfig::default().style;
		assert_eq!(
			rect_fills(&scene),
			vec![
				style.active_group_fill.as_str(),
				style.anchor_fill.as_str(),
				style.active_anchor_fill.as_str()
			]
		);
		assert!(scene.group_error.is_none());
	}

	#[test]
	fn membership_conflict_degrades_to_plain_groups() {
		let mut doc = room_document();
		doc.nodes.push(DiagramNode::group("g2", Some("Room B"), 0.0, 0.0, 200.0, 200.0));
		let scene = build(&doc, Some(7));
		let style = OverviewConfig::default().style;
		let fills = rect_fills(&scene);
		assert_eq!(&fills[..2], &[style.group_fill.as_str(), style.group_fill.as_str()]);
		assert_eq!(fills[3], style.active_anchor_fill.as_str());
		let err = scene.group_error.expect("conflict reported");
		assert_eq!(err.groups, vec!["Room A".to_owned(), "Room B".to_owned()]);
	}

	#[test]
	fn rebuilding_is_idempotent() {
		let doc = room_document();
		assert_eq!(build(&doc, Some(7)), build(&doc, Some(7)));
	}

	#[test]
	fn hit_test_finds_only_drawn_anchors() {
		let scene = build(&room_document(), None);
		let nine = scene.hit_regions.iter().find(|r| r.station == 9).unwrap().rect;
		let (cx, cy) = nine.center();
		assert_eq!(scene.station_at(cx, cy), Some(9));
		assert_eq!(scene.station_at(1.0, 1.0), None);
	}

	#[test]
	fn placeholder_has_no_click_targets() {
		let scene = Scene::placeholder(&OverviewConfig::default(), "Loading…", "white");
		assert!(scene.hit_regions.is_empty());
		assert_eq!(scene.primitives.len(), 1);
	}
}
