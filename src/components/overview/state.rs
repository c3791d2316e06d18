use log::{debug, info, warn};

use super::config::OverviewConfig;
use super::error::{LoadError, MultipleGroupMembershipError, OverviewError};
use super::framing::TransformState;
use super::groups::{group_of_station, validate_group_membership};
use super::scale::{Bounds, base_scale};
use super::scene::Scene;
use super::types::{DiagramDocument, StationId};

/// Identity of one document load request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What happened to a completed load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
	Loaded,
	Failed,
	/// A newer request was issued (or the overview destroyed) meanwhile; the result was dropped.
	Superseded,
}

/// A document together with the values derived from it at load time.
#[derive(Clone, Debug)]
pub struct LoadedDocument {
	pub document: DiagramDocument,
	pub bounds: Bounds,
}

#[derive(Clone, Debug)]
pub enum Phase {
	Uninitialized,
	Loaded(LoadedDocument),
	Errored(LoadError),
	Destroyed,
}

/// One overview instance: document, highlight target, framing and current scene.
#[derive(Debug)]
pub struct Overview {
	config: OverviewConfig,
	phase: Phase,
	highlight: Option<StationId>,
	transform: TransformState,
	scene: Scene,
	next_ticket: u64,
	pending: Option<LoadTicket>,
}

impl Overview {
	pub fn new(config: OverviewConfig) -> Self {
		let scene = Scene::placeholder(&config, "Loading…", &config.style.placeholder_text);
		Self {
			config,
			phase: Phase::Uninitialized,
			highlight: None,
			transform: TransformState::default(),
			scene,
			next_ticket: 0,
			pending: None,
		}
	}

	pub fn config(&self) -> &OverviewConfig {
		&self.config
	}

	pub fn phase(&self) -> &Phase {
		&self.phase
	}

	pub fn highlight_target(&self) -> Option<StationId> {
		self.highlight
	}

	pub fn transform(&self) -> &TransformState {
		&self.transform
	}

	pub fn scene(&self) -> &Scene {
		&self.scene
	}

	pub fn is_destroyed(&self) -> bool {
		matches!(self.phase, Phase::Destroyed)
	}

	pub fn document(&self) -> Option<&DiagramDocument> {
		match &self.phase {
			Phase::Loaded(loaded) => Some(&loaded.document),
			_ => None,
		}
	}

	/// Starts a load of `locator`; only the latest ticket's completion is applied.
	pub fn begin_load(&mut self, locator: &str) -> Result<LoadTicket, OverviewError> {
		self.ensure_alive()?;
		self.next_ticket += 1;
		let ticket = LoadTicket(self.next_ticket);
		self.pending = Some(ticket);
		info!("loading diagram {locator}");
		Ok(ticket)
	}

	/// Applies the outcome of the load identified by `ticket`.
	///
	/// A successful load replaces the document, recomputes bounds and base
	/// scale, and re-frames the current highlight target. The returned error,
	/// if any, comes from that re-framing; the scene is rendered regardless.
	pub fn complete_load(
		&mut self,
		ticket: LoadTicket,
		result: Result<DiagramDocument, LoadError>,
	) -> Result<LoadStatus, OverviewError> {
		if self.pending != Some(ticket) {
			debug!("dropping superseded load {ticket:?}");
			return Ok(LoadStatus::Superseded);
		}
		self.pending = None;

		match result {
			Ok(document) => {
				info!("diagram loaded with {} nodes", document.nodes.len());
				let bounds = Bounds::of(&document.nodes);
				self.transform = TransformState::new(base_scale(&bounds, &self.config));
				self.phase = Phase::Loaded(LoadedDocument { document, bounds });
				self.reframe()?;
				Ok(LoadStatus::Loaded)
			}
			Err(err) => {
				warn!("{err}");
				self.transform = TransformState::default();
				self.phase = Phase::Errored(err);
				self.redraw();
				Ok(LoadStatus::Failed)
			}
		}
	}

	/// Makes `id` the current station and frames it.
	pub fn set_highlight_target(&mut self, id: StationId) -> Result<(), OverviewError> {
		self.ensure_alive()?;
		self.highlight = Some(id);
		self.reframe()
	}

	/// Drops the current station and restores the resting view.
	pub fn clear_highlight_target(&mut self) -> Result<(), OverviewError> {
		self.ensure_alive()?;
		self.highlight = None;
		self.reset_framing()
	}

	/// Restores zoom 1 and zero pan, whatever the target.
	pub fn reset_framing(&mut self) -> Result<(), OverviewError> {
		self.ensure_alive()?;
		self.transform.reset();
		self.redraw();
		Ok(())
	}

	/// Changes the logical viewport size; base scale and framing follow.
	pub fn resize(&mut self, width: f64, height: f64) -> Result<(), OverviewError> {
		self.ensure_alive()?;
		self.config.width = width;
		self.config.height = height;
		if let Phase::Loaded(loaded) = &self.phase {
			self.transform.base_scale = base_scale(&loaded.bounds, &self.config);
		}
		self.reframe()
	}

	/// Every anchor in the loaded document that sits in more than one group.
	pub fn validate(&self) -> Vec<MultipleGroupMembershipError> {
		self.document()
			.map(validate_group_membership)
			.unwrap_or_default()
	}

	/// Station drawn at the viewport point, if any.
	pub fn station_at(&self, x: f64, y: f64) -> Option<StationId> {
		self.scene.station_at(x, y)
	}

	/// Releases the scene and forbids further operations. Safe to repeat.
	pub fn destroy(&mut self) {
		if self.is_destroyed() {
			return;
		}
		debug!("destroying overview");
		self.phase = Phase::Destroyed;
		self.pending = None;
		self.highlight = None;
		self.transform = TransformState::default();
		self.scene = Scene::empty(&self.config);
	}

	fn ensure_alive(&self) -> Result<(), OverviewError> {
		if self.is_destroyed() {
			warn!("operation on destroyed overview");
			return Err(OverviewError::Destroyed);
		}
		Ok(())
	}

	/// Recomputes zoom and pan for the current target, then redraws.
	fn reframe(&mut self) -> Result<(), OverviewError> {
		let framed = self.frame_target();
		self.redraw();
		framed.map_err(|err| {
			warn!("{err}");
			err.into()
		})
	}

	fn frame_target(&mut self) -> Result<(), MultipleGroupMembershipError> {
		self.transform.reset();
		let (Phase::Loaded(loaded), Some(id)) = (&self.phase, self.highlight) else {
			return Ok(());
		};
		let Some(anchor) = loaded.document.anchor_for(id) else {
			debug!("station {id} has no anchor; leaving framing at rest");
			return Ok(());
		};
		match group_of_station(&loaded.document, id)? {
			Some(group) => self.transform.frame_group(&loaded.bounds, &self.config, group),
			None => self.transform.frame_node(&loaded.bounds, &self.config, anchor),
		}
		Ok(())
	}

	fn redraw(&mut self) {
		self.scene = match &self.phase {
			Phase::Uninitialized => {
				Scene::placeholder(&self.config, "Loading…", &self.config.style.placeholder_text)
			}
			Phase::Loaded(loaded) => Scene::build(
				&loaded.document,
				&loaded.bounds,
				&self.transform,
				&self.config,
				self.highlight,
			),
			Phase::Errored(err) => {
				Scene::placeholder(&self.config, &err.to_string(), &self.config.style.error_text)
			}
			Phase::Destroyed => Scene::empty(&self.config),
		};
	}
}

#[cfg(test)]
mod tests {
	use futures::executor::block_on;

	use super::*;
	use crate::components::overview::framing::{NODE_ZOOM_MAX, NODE_ZOOM_MIN};
	use crate::components::overview::loader::DiagramStore;
	use crate::components::overview::loader::tests::MemoryStore;
	use crate::components::overview::scene::Primitive;
	use crate::components::overview::types::DiagramNode;

	const EPS: f64 = 1e-9;

	fn room_document() -> DiagramDocument {
		DiagramDocument::new(vec![
			DiagramNode::group("g", Some("Room A"), 0.0, 0.0, 400.0, 300.0),
			DiagramNode::text("n7", "7", 50.0, 50.0, 40.0, 40.0),
			DiagramNode::text("n9", "9", 600.0, 400.0, 40.0, 40.0),
		])
	}

	fn loaded(document: DiagramDocument) -> Overview {
		let mut overview = Overview::new(OverviewConfig::default());
		let ticket = overview.begin_load("room.canvas").unwrap();
		assert_eq!(
			overview.complete_load(ticket, Ok(document)),
			Ok(LoadStatus::Loaded)
		);
		overview
	}

	fn anchor_fill(overview: &Overview, station: StationId) -> String {
		let rect = overview
			.scene()
			.hit_regions
			.iter()
			.find(|r| r.station == station)
			.unwrap()
			.rect;
		overview
			.scene()
			.primitives
			.iter()
			.find_map(|p| match p {
				Primitive::Rect { rect: r, fill, .. } if *r == rect => Some(fill.clone()),
				_ => None,
			})
			.unwrap()
	}

	fn view_center_of(overview: &Overview, x: f64, y: f64) -> (f64, f64) {
		let Phase::Loaded(loaded) = overview.phase() else {
			panic!("not loaded");
		};
		overview
			.transform()
			.world_to_view(&loaded.bounds, overview.config(), x, y)
	}

	#[test]
	fn grouped_and_ungrouped_targets_are_framed_differently() {
		let mut overview = loaded(room_document());
		let style = overview.config().style.clone();

		overview.set_highlight_target(7).unwrap();
		assert!(overview.transform().zoom >= 1.0);
		let (gx, gy) = view_center_of(&overview, 200.0, 150.0);
		assert!((gy - 300.0).abs() < EPS);
		// Scaled diagram is wider than the viewport; centering would leave a gap at the left edge.
		assert_eq!(overview.transform().pan_x, 0.0);
		assert!(gx < 250.0);
		assert_eq!(anchor_fill(&overview, 7), style.active_anchor_fill);
		assert_eq!(anchor_fill(&overview, 9), style.anchor_fill);

		overview.set_highlight_target(9).unwrap();
		let zoom = overview.transform().zoom;
		assert!((NODE_ZOOM_MIN..=NODE_ZOOM_MAX).contains(&zoom));
		assert_eq!(anchor_fill(&overview, 9), style.active_anchor_fill);
		assert_eq!(anchor_fill(&overview, 7), style.anchor_fill);
	}

	#[test]
	fn framing_the_same_target_twice_is_stable() {
		let mut overview = loaded(room_document());
		overview.set_highlight_target(7).unwrap();
		let first = *overview.transform();
		overview.set_highlight_target(7).unwrap();
		assert_eq!(*overview.transform(), first);
	}

	#[test]
	fn reset_after_any_sequence_restores_defaults() {
		let mut overview = loaded(room_document());
		overview.set_highlight_target(7).unwrap();
		overview.set_highlight_target(9).unwrap();
		overview.reset_framing().unwrap();
		let t = overview.transform();
		assert_eq!((t.zoom, t.pan_x, t.pan_y), (1.0, 0.0, 0.0));
	}

	#[test]
	fn missing_anchor_leaves_view_at_rest() {
		let mut overview = loaded(room_document());
		overview.set_highlight_target(42).unwrap();
		let t = overview.transform();
		assert_eq!((t.zoom, t.pan_x, t.pan_y), (1.0, 0.0, 0.0));
	}

	#[test]
	fn click_on_anchor_reports_station_once() {
		let mut overview = loaded(room_document());
		overview.set_highlight_target(9).unwrap();
		let rect = overview
			.scene()
			.hit_regions
			.iter()
			.find(|r| r.station == 9)
			.unwrap()
			.rect;
		let (cx, cy) = rect.center();

		let clicks: Vec<StationId> = [(cx, cy), (-5.0, -5.0)]
			.into_iter()
			.filter_map(|(x, y)| overview.station_at(x, y))
			.collect();
		assert_eq!(clicks, vec![9]);
	}

	#[test]
	fn conflicting_groups_surface_error_but_still_render() {
		let mut document = room_document();
		document
			.nodes
			.push(DiagramNode::group("g2", Some("Hall"), 0.0, 0.0, 100.0, 100.0));
		let mut overview = loaded(document);

		let err = overview.set_highlight_target(7).unwrap_err();
		assert_eq!(
			err,
			OverviewError::MultipleGroupMembership(MultipleGroupMembershipError {
				node: "7".into(),
				groups: vec!["Room A".into(), "Hall".into()],
			})
		);
		assert_eq!(overview.scene().hit_regions.len(), 2);
		assert!(overview.scene().group_error.is_some());
		assert_eq!(overview.validate().len(), 1);
	}

	#[test]
	fn stale_load_completion_is_ignored() {
		let mut overview = Overview::new(OverviewConfig::default());
		let first = overview.begin_load("old.canvas").unwrap();
		let second = overview.begin_load("new.canvas").unwrap();

		let newer = DiagramDocument::new(vec![DiagramNode::text("n", "1", 0.0, 0.0, 10.0, 10.0)]);
		assert_eq!(overview.complete_load(second, Ok(newer.clone())), Ok(LoadStatus::Loaded));
		assert_eq!(
			overview.complete_load(first, Ok(room_document())),
			Ok(LoadStatus::Superseded)
		);
		assert_eq!(overview.document(), Some(&newer));
	}

	#[test]
	fn failed_load_shows_error_and_later_load_recovers() {
		let store = MemoryStore::with("good.canvas", r#"{"nodes": [{"id": "n", "type": "text", "x": 0, "y": 0, "width": 10, "height": 10, "text": "3"}]}"#);
		let mut overview = Overview::new(OverviewConfig::default());

		let ticket = overview.begin_load("missing.canvas").unwrap();
		let result = block_on(store.fetch("missing.canvas"));
		assert_eq!(overview.complete_load(ticket, result), Ok(LoadStatus::Failed));
		assert!(matches!(overview.phase(), Phase::Errored(LoadError::Status { status: 404, .. })));
		assert!(overview.scene().hit_regions.is_empty());
		assert!(matches!(
			&overview.scene().primitives[..],
			[Primitive::Label { text, .. }] if text.contains("missing.canvas")
		));

		let ticket = overview.begin_load("good.canvas").unwrap();
		let result = block_on(store.fetch("good.canvas"));
		assert_eq!(overview.complete_load(ticket, result), Ok(LoadStatus::Loaded));
		assert_eq!(overview.station_at(25.0, 25.0), Some(3));
	}

	#[test]
	fn highlight_set_before_load_is_framed_on_arrival() {
		let mut overview = Overview::new(OverviewConfig::default());
		overview.set_highlight_target(9).unwrap();
		let ticket = overview.begin_load("room.canvas").unwrap();
		overview.complete_load(ticket, Ok(room_document())).unwrap();
		assert!(overview.transform().zoom >= NODE_ZOOM_MIN);
	}

	#[test]
	fn resize_recomputes_base_scale() {
		let mut overview = loaded(room_document());
		let before = overview.transform().base_scale;
		overview.resize(250.0, 300.0).unwrap();
		assert!(overview.transform().base_scale < before);
	}

	#[test]
	fn destroy_is_idempotent_and_blocks_operations() {
		let mut overview = Overview::new(OverviewConfig::default());
		let pending = overview.begin_load("room.canvas").unwrap();
		overview.destroy();
		overview.destroy();
		assert!(overview.is_destroyed());
		assert_eq!(
			overview.complete_load(pending, Ok(room_document())),
			Ok(LoadStatus::Superseded)
		);
		assert_eq!(overview.set_highlight_target(7), Err(OverviewError::Destroyed));
		assert_eq!(overview.reset_framing(), Err(OverviewError::Destroyed));
		assert_eq!(overview.begin_load("x").unwrap_err(), OverviewError::Destroyed);
		assert!(overview.scene().primitives.is_empty());
		assert_eq!(overview.station_at(250.0, 300.0), None);
	}
}
