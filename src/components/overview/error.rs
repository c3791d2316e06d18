use thiserror::Error;

/// The diagram document could not be fetched or parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
	#[error("could not fetch diagram `{locator}`: {message}")]
	Fetch { locator: String, message: String },

	#[error("diagram `{locator}` responded with HTTP {status}")]
	Status { locator: String, status: u16 },

	#[error("diagram `{locator}` is not a valid document: {message}")]
	Parse { locator: String, message: String },
}

/// A station anchor lies inside more than one group.
///
/// This is an authoring mistake in the diagram, reported verbatim to the user.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("station \"{node}\" is inside more than one group: {}", .groups.join(", "))]
pub struct MultipleGroupMembershipError {
	/// Display text of the contained node.
	pub node: String,
	/// Label (or id, when unlabeled) of every group containing the node.
	pub groups: Vec<String>,
}

/// Failure of an overview control operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OverviewError {
	#[error(transparent)]
	MultipleGroupMembership(#[from] MultipleGroupMembershipError),

	#[error("the overview has been destroyed")]
	Destroyed,
}
