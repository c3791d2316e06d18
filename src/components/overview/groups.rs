//! Resolution of the group that geometrically contains a node.

use super::error::MultipleGroupMembershipError;
use super::types::{DiagramDocument, DiagramNode, StationId};

/// The unique group fully containing `node`, if any.
///
/// More than one containing group is an error in the authored diagram.
pub fn resolve_containing_group<'a>(
	document: &'a DiagramDocument,
	node: &DiagramNode,
) -> Result<Option<&'a DiagramNode>, MultipleGroupMembershipError> {
	let mut containing = document
		.groups()
		.filter(|group| group.id != node.id && group.contains(node));
	let Some(first) = containing.next() else {
		return Ok(None);
	};
	let rest: Vec<&DiagramNode> = containing.collect();
	if rest.is_empty() {
		return Ok(Some(first));
	}

	let groups = std::iter::once(first)
		.chain(rest)
		.map(|group| group.display_name().to_owned())
		.collect();
	Err(MultipleGroupMembershipError {
		node: node.display_name().to_owned(),
		groups,
	})
}

/// Group containing the framing anchor of `station`.
///
/// Ok(None) both when the station has no anchor and when it is ungrouped.
pub fn group_of_station(
	document: &DiagramDocument,
	station: StationId,
) -> Result<Option<&DiagramNode>, MultipleGroupMembershipError> {
	match document.anchor_for(station) {
		Some(anchor) => resolve_containing_group(document, anchor),
		None => Ok(None),
	}
}

/// Checks every station anchor at once.
///
/// Never run implicitly; hosts call it to surface conflicts on stations that
/// have not been highlighted yet.
pub fn validate_group_membership(document: &DiagramDocument) -> Vec<MultipleGroupMembershipError> {
	document
		.anchors()
		.filter_map(|(_, anchor)| resolve_containing_group(document, anchor).err())
		.collect()
}
