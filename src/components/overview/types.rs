use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Integer id of a station, rendered in the diagram as an anchor node.
pub type StationId = u32;

/// The closed set of node kinds a diagram may contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	Text,
	File,
	Group,
	Link,
}

/// A positioned rectangle in world space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagramNode {
	pub id: String,
	#[serde(rename = "type")]
	pub kind: NodeKind,
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub text: Option<String>,
	#[serde(default, rename = "file", skip_serializing_if = "Option::is_none")]
	pub file_ref: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	/// Fields this crate does not read; kept so documents survive a round trip.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl DiagramNode {
	/// A node with no optional fields set.
	pub fn new(id: impl Into<String>, kind: NodeKind, x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			id: id.into(),
			kind,
			x,
			y,
			width,
			height,
			text: None,
			file_ref: None,
			label: None,
			url: None,
			extra: Map::new(),
		}
	}

	/// A text node, the kind used for station anchors.
	pub fn text(id: impl Into<String>, text: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			text: Some(text.into()),
			..Self::new(id, NodeKind::Text, x, y, width, height)
		}
	}

	/// A group container with an optional label.
	pub fn group(id: impl Into<String>, label: Option<&str>, x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			label: label.map(str::to_owned),
			..Self::new(id, NodeKind::Group, x, y, width, height)
		}
	}

	pub fn is_group(&self) -> bool {
		self.kind == NodeKind::Group
	}

	pub fn right(&self) -> f64 {
		self.x + self.width
	}

	pub fn bottom(&self) -> f64 {
		self.y + self.height
	}

	pub fn center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	/// True when `other` lies entirely inside this node's rectangle, edges included.
	pub fn contains(&self, other: &DiagramNode) -> bool {
		other.x >= self.x
			&& other.y >= self.y
			&& other.right() <= self.right()
			&& other.bottom() <= self.bottom()
	}

	/// Station id this node anchors, if it is a non-group node whose text is all digits.
	pub fn station_id(&self) -> Option<StationId> {
		if self.is_group() {
			return None;
		}
		let text = self.text.as_deref()?;
		if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
			return None;
		}
		text.parse().ok()
	}

	/// Whether this is the text node that anchors `id` for framing purposes.
	pub fn is_anchor_for(&self, id: StationId) -> bool {
		self.kind == NodeKind::Text && self.text.as_deref() == Some(id.to_string().as_str())
	}

	/// Human-readable name: the group label, the node text, or the id.
	pub fn display_name(&self) -> &str {
		self.label
			.as_deref()
			.filter(|label| self.is_group() && !label.is_empty())
			.or(self.text.as_deref())
			.unwrap_or(&self.id)
	}
}

/// A diagram as delivered by the diagram store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramDocument {
	#[serde(default)]
	pub nodes: Vec<DiagramNode>,
	/// Edges are carried but never interpreted by the overview.
	#[serde(default)]
	pub edges: Vec<Value>,
}

impl DiagramDocument {
	pub fn new(nodes: Vec<DiagramNode>) -> Self {
		Self {
			nodes,
			edges: Vec::new(),
		}
	}

	pub fn groups(&self) -> impl Iterator<Item = &DiagramNode> {
		self.nodes.iter().filter(|node| node.is_group())
	}

	/// Every non-group node carrying a station id, in document order.
	pub fn anchors(&self) -> impl Iterator<Item = (StationId, &DiagramNode)> {
		self.nodes
			.iter()
			.filter_map(|node| node.station_id().map(|id| (id, node)))
	}

	/// The text node framing should target for `id`.
	pub fn anchor_for(&self, id: StationId) -> Option<&DiagramNode> {
		self.nodes.iter().find(|node| node.is_anchor_for(id))
	}
}
