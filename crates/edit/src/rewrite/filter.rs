//! Generic filtering rewrite over composition trees.
//!
//! A filter sees each composable once and answers with what should take its
//! place: nothing (prune), one node (keep or replace), or several (expand).
//! Compositions returned by a filter then have their own children filtered.

use cl_timeline::{Composable, Node, NodeKind, SerializableCollection, Timeline};

fn pruned(kind: NodeKind, prune: &[NodeKind]) -> bool {
    prune.contains(&kind)
}

/// Filter a copy of `root`, dropping any node whose kind is in `prune`.
///
/// A composable root is filtered too: zero results prune the whole tree, one
/// replaces the root, several keep the root as it was. A timeline's track
/// stack is not offered to the filter but its children are. Returns `None`
/// when the root itself is pruned.
pub fn filtered_composition<F>(root: &Node, mut filter: F, prune: &[NodeKind]) -> Option<Node>
where
    F: FnMut(Composable) -> Vec<Composable>,
{
    filter_node(root, &mut filter, prune)
}

fn filter_node<F>(node: &Node, filter: &mut F, prune: &[NodeKind]) -> Option<Node>
where
    F: FnMut(Composable) -> Vec<Composable>,
{
    if pruned(node.kind(), prune) {
        return None;
    }

    match node {
        Node::Composable(composable) => {
            let copy = composable.duplicate();
            let mut results = filter(copy.clone());
            let chosen = match results.len() {
                0 => return None,
                1 => results.pop()?,
                _ => copy,
            };
            if pruned(chosen.kind(), prune) {
                return None;
            }
            Some(Node::Composable(filter_descendants(chosen, filter, prune)))
        }
        Node::Timeline(timeline) => {
            let mut copy = timeline.duplicate();
            let children = std::mem::take(&mut copy.tracks.children);
            copy.tracks.children = filter_children(children, filter, prune);
            Some(Node::Timeline(copy))
        }
        Node::Collection(collection) => Some(Node::Collection(SerializableCollection {
            name: collection.name.clone(),
            children: collection
                .children
                .iter()
                .filter_map(|child| filter_node(child, filter, prune))
                .collect(),
        })),
    }
}

fn filter_children<F>(children: Vec<Composable>, filter: &mut F, prune: &[NodeKind]) -> Vec<Composable>
where
    F: FnMut(Composable) -> Vec<Composable>,
{
    let mut result = Vec::with_capacity(children.len());
    for child in children {
        if pruned(child.kind(), prune) {
            continue;
        }
        for replacement in filter(child) {
            if pruned(replacement.kind(), prune) {
                continue;
            }
            result.push(filter_descendants(replacement, filter, prune));
        }
    }
    result
}

fn filter_descendants<F>(mut node: Composable, filter: &mut F, prune: &[NodeKind]) -> Composable
where
    F: FnMut(Composable) -> Vec<Composable>,
{
    if let Some(comp) = node.as_composition_mut() {
        let children = std::mem::take(comp.children_mut());
        *comp.children_mut() = filter_children(children, filter, prune);
    }
    node
}

/// Like [`filtered_composition`], but the filter also sees the original
/// previous and next siblings of each node. The root is never filtered.
pub fn filtered_with_sequence_context<F>(
    root: &Node,
    mut filter: F,
    prune: &[NodeKind],
) -> Option<Node>
where
    F: FnMut(Option<&Composable>, Composable, Option<&Composable>) -> Vec<Composable>,
{
    filter_node_in_context(root, &mut filter, prune)
}

fn filter_node_in_context<F>(node: &Node, filter: &mut F, prune: &[NodeKind]) -> Option<Node>
where
    F: FnMut(Option<&Composable>, Composable, Option<&Composable>) -> Vec<Composable>,
{
    if pruned(node.kind(), prune) {
        return None;
    }

    match node {
        Node::Composable(composable) => Some(Node::Composable(descend_in_context(
            composable.duplicate(),
            filter,
            prune,
        ))),
        Node::Timeline(timeline) => Some(Node::Timeline(timeline_in_context(timeline, filter, prune))),
        Node::Collection(collection) => {
            let siblings: Vec<Option<&Composable>> = collection
                .children
                .iter()
                .map(Node::as_composable)
                .collect();
            let mut children = Vec::with_capacity(collection.children.len());
            for (index, child) in collection.children.iter().enumerate() {
                let Some(composable) = child.as_composable() else {
                    children.extend(filter_node_in_context(child, filter, prune));
                    continue;
                };
                if pruned(composable.kind(), prune) {
                    continue;
                }
                let prev = index.checked_sub(1).and_then(|i| siblings[i]);
                let next = siblings.get(index + 1).copied().flatten();
                for replacement in filter(prev, composable.duplicate(), next) {
                    if pruned(replacement.kind(), prune) {
                        continue;
                    }
                    children.push(Node::Composable(descend_in_context(replacement, filter, prune)));
                }
            }
            Some(Node::Collection(SerializableCollection {
                name: collection.name.clone(),
                children,
            }))
        }
    }
}

fn timeline_in_context<F>(timeline: &Timeline, filter: &mut F, prune: &[NodeKind]) -> Timeline
where
    F: FnMut(Option<&Composable>, Composable, Option<&Composable>) -> Vec<Composable>,
{
    let mut copy = timeline.duplicate();
    let children = std::mem::take(&mut copy.tracks.children);
    copy.tracks.children = children_in_context(children, filter, prune);
    copy
}

fn children_in_context<F>(children: Vec<Composable>, filter: &mut F, prune: &[NodeKind]) -> Vec<Composable>
where
    F: FnMut(Option<&Composable>, Composable, Option<&Composable>) -> Vec<Composable>,
{
    let mut result = Vec::with_capacity(children.len());
    for (index, child) in children.iter().enumerate() {
        if pruned(child.kind(), prune) {
            continue;
        }
        let prev = index.checked_sub(1).and_then(|i| children.get(i));
        let next = children.get(index + 1);
        for replacement in filter(prev, child.clone(), next) {
            if pruned(replacement.kind(), prune) {
                continue;
            }
            result.push(descend_in_context(replacement, filter, prune));
        }
    }
    result
}

fn descend_in_context<F>(mut node: Composable, filter: &mut F, prune: &[NodeKind]) -> Composable
where
    F: FnMut(Option<&Composable>, Composable, Option<&Composable>) -> Vec<Composable>,
{
    if let Some(comp) = node.as_composition_mut() {
        let children = std::mem::take(comp.children_mut());
        *comp.children_mut() = children_in_context(children, filter, prune);
    }
    node
}

/// Keeps every node as it is.
pub fn keep_filter() -> impl FnMut(Composable) -> Vec<Composable> {
    |node| vec![node]
}

/// Drops every node it sees.
pub fn prune_filter() -> impl FnMut(Composable) -> Vec<Composable> {
    |_| Vec::new()
}

/// Keeps only nodes whose kind is listed.
pub fn type_filter(kinds: &[NodeKind]) -> impl FnMut(Composable) -> Vec<Composable> {
    let kinds = kinds.to_vec();
    move |node| {
        if kinds.contains(&node.kind()) {
            vec![node]
        } else {
            Vec::new()
        }
    }
}

/// Keeps only nodes whose name satisfies `predicate`.
pub fn name_filter<P>(mut predicate: P) -> impl FnMut(Composable) -> Vec<Composable>
where
    P: FnMut(&str) -> bool,
{
    move |node| {
        if predicate(node.name()) {
            vec![node]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cl_common::{RationalTime, TimeRange};
    use cl_timeline::{Clip, Gap, Stack, Track, TrackKind, Transition};

    fn rt(v: f64) -> RationalTime {
        RationalTime::new(v, 24.0)
    }

    fn clip(name: &str, duration: f64) -> Composable {
        Clip::new(name, Some(TimeRange::new(rt(0.0), rt(duration)))).into()
    }

    fn make_track() -> Composable {
        Track::new("V1", TrackKind::Video)
            .with_children([
                clip("A", 24.0),
                Transition::new("x", rt(4.0), rt(4.0)).into(),
                clip("B", 24.0),
                Gap::with_duration(rt(12.0)).into(),
                Stack::new("nest")
                    .with_children([Composable::from(
                        Track::new("inner", TrackKind::Video).with_children([clip("C", 10.0)]),
                    )])
                    .into(),
            ])
            .into()
    }

    fn child_names(node: &Node) -> Vec<String> {
        let composable = node.as_composable().unwrap();
        composable
            .as_composition()
            .unwrap()
            .children()
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    #[test]
    fn keep_filter_copies_with_fresh_ids() {
        let root = Node::from(make_track());
        let filtered = filtered_composition(&root, keep_filter(), &[]).unwrap();
        assert_eq!(child_names(&filtered), vec!["A", "x", "B", "", "nest"]);
        let original = root.as_composable().unwrap();
        let copy = filtered.as_composable().unwrap();
        assert_ne!(copy.id(), original.id());
    }

    #[test]
    fn prune_kinds_drop_nodes() {
        let root = Node::from(make_track());
        let filtered =
            filtered_composition(&root, keep_filter(), &[NodeKind::Transition, NodeKind::Gap])
                .unwrap();
        assert_eq!(child_names(&filtered), vec!["A", "B", "nest"]);

        assert!(filtered_composition(&root, keep_filter(), &[NodeKind::Track]).is_none());
    }

    #[test]
    fn prune_filter_empties_the_tree() {
        let root = Node::from(make_track());
        assert!(filtered_composition(&root, prune_filter(), &[]).is_none());
    }

    #[test]
    fn filter_runs_once_per_node() {
        let root = Node::from(make_track());
        let mut seen = Vec::new();
        filtered_composition(
            &root,
            |node: Composable| {
                seen.push(node.name().to_string());
                vec![node]
            },
            &[],
        )
        .unwrap();
        assert_eq!(seen, vec!["V1", "A", "x", "B", "", "nest", "inner", "C"]);
    }

    #[test]
    fn filter_can_expand_and_replace() {
        let root = Node::from(make_track());
        let filtered = filtered_composition(
            &root,
            |node: Composable| match node.name() {
                "A" => vec![clip("A1", 12.0), clip("A2", 12.0)],
                "B" => vec![clip("B'", 24.0)],
                _ => vec![node],
            },
            &[],
        )
        .unwrap();
        assert_eq!(child_names(&filtered), vec!["A1", "A2", "x", "B'", "", "nest"]);
    }

    #[test]
    fn type_and_name_filters() {
        let root = Node::from(make_track());
        let kinds = [NodeKind::Track, NodeKind::Clip, NodeKind::Stack];
        let filtered = filtered_composition(&root, type_filter(&kinds), &[]).unwrap();
        assert_eq!(child_names(&filtered), vec!["A", "B", "nest"]);

        let filtered =
            filtered_composition(&root, name_filter(|name| name != "B"), &[]).unwrap();
        assert_eq!(child_names(&filtered), vec!["A", "x", "", "nest"]);
    }

    #[test]
    fn timeline_stack_is_not_filtered() {
        let timeline = Timeline::new("edit").with_tracks([Track::new("V1", TrackKind::Video)
            .with_children([clip("A", 24.0), clip("B", 24.0)])]);
        let root = Node::from(timeline);
        let filtered = filtered_composition(&root, name_filter(|n| n != "tracks" && n != "A"), &[])
            .unwrap();
        let timeline = filtered.as_timeline().unwrap();
        let track = timeline.tracks.children[0].as_track().unwrap();
        assert_eq!(track.children.len(), 1);
        assert_eq!(track.children[0].name(), "B");
    }

    #[test]
    fn collections_filter_each_root() {
        let collection = SerializableCollection::new("bin").with_children([
            Node::from(clip("keep", 10.0)),
            Node::from(clip("drop", 10.0)),
            Node::from(Timeline::new("edit")),
        ]);
        let filtered = filtered_composition(
            &Node::from(collection),
            name_filter(|n| n != "drop"),
            &[],
        )
        .unwrap();
        let names: Vec<_> = filtered
            .as_collection()
            .unwrap()
            .children
            .iter()
            .map(|n| n.name().to_string())
            .collect();
        assert_eq!(names, vec!["keep", "edit"]);
    }

    #[test]
    fn context_filter_sees_original_neighbors() {
        let root = Node::from(make_track());
        let mut seen = Vec::new();
        let filtered = filtered_with_sequence_context(
            &root,
            |prev: Option<&Composable>, node: Composable, next: Option<&Composable>| {
                seen.push((
                    prev.map(|p| p.name().to_string()),
                    node.name().to_string(),
                    next.map(|n| n.name().to_string()),
                ));
                if node.as_transition().is_some() {
                    Vec::new()
                } else {
                    vec![node]
                }
            },
            &[],
        )
        .unwrap();

        assert_eq!(child_names(&filtered), vec!["A", "B", "", "nest"]);
        assert_eq!(seen[0], (None, "A".to_string(), Some("x".to_string())));
        assert_eq!(
            seen[2],
            (Some("x".to_string()), "B".to_string(), Some("".to_string()))
        );
        assert!(seen.iter().all(|(_, name, _)| name != "V1"));
    }

    #[test]
    fn context_filter_over_collection() {
        let collection = SerializableCollection::new("bin").with_children([
            Node::from(clip("a", 10.0)),
            Node::from(clip("b", 10.0)),
        ]);
        let mut pairs = Vec::new();
        filtered_with_sequence_context(
            &Node::from(collection),
            |prev: Option<&Composable>, node: Composable, _next: Option<&Composable>| {
                pairs.push((prev.map(|p| p.name().to_string()), node.name().to_string()));
                vec![node]
            },
            &[],
        )
        .unwrap();
        assert_eq!(pairs, vec![(None, "a".to_string()), (Some("a".to_string()), "b".to_string())]);
    }
}
