//! Resolve a rendered node back to the resource record it came from

use crate::models::{DebugPayload, ResourceKind, ResourceRef, ResourceTarget};

/// A resource record found for a node id
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedResource<'a> {
    pub kind: ResourceKind,
    pub resource: &'a ResourceRef,
}

impl ResolvedResource<'_> {
    /// Where the debug panel should navigate for this resource
    pub fn target(&self) -> ResourceTarget {
        ResourceTarget::new(self.kind, self.resource.name.clone())
    }
}

/// Candidate records in lookup priority order
///
/// Pods, ingresses, then services (related services followed by the legacy
/// dependencies, dependents and connections), then configmaps, then secrets.
fn candidates(payload: &DebugPayload) -> impl Iterator<Item = (ResourceKind, &ResourceRef)> {
    let related = &payload.related;
    let legacy = payload.graph.as_ref();
    let legacy_services = legacy
        .into_iter()
        .flat_map(|g| g.dependencies.iter().chain(&g.dependents).chain(&g.connections));

    let pods = related.pods.iter().map(|r| (ResourceKind::Pod, r));
    let ingresses = related.ingresses.iter().map(|r| (ResourceKind::Ingress, r));
    let services = related
        .services
        .iter()
        .chain(legacy_services)
        .map(|r| (ResourceKind::Service, r));
    let config_maps = related
        .config_maps
        .iter()
        .map(|r| (ResourceKind::ConfigMap, r));
    let secrets = related.secrets.iter().map(|r| (ResourceKind::Secret, r));

    pods.chain(ingresses)
        .chain(services)
        .chain(config_maps)
        .chain(secrets)
}

/// Find the resource behind an activated node
///
/// Accepts bare names and `kind/name` ids. A bare name returns the first match
/// in priority order; a qualified id only matches records of that kind. The
/// focal resource itself never resolves.
pub fn resolve_node<'a>(
    node_id: &str,
    payload: &'a DebugPayload,
) -> Option<ResolvedResource<'a>> {
    let (kind_filter, name) = match node_id.split_once('/') {
        Some((kind, name)) => match kind.parse::<ResourceKind>() {
            Ok(kind) => (Some(kind), name),
            Err(_) => (None, node_id),
        },
        None => (None, node_id),
    };

    candidates(payload)
        .filter(|(kind, _)| kind_filter.is_none_or(|wanted| wanted == *kind))
        .find(|(_, resource)| resource.name == name)
        .map(|(kind, resource)| ResolvedResource { kind, resource })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LegacyGraph, RelationGroup};

    fn payload_with(group: RelationGroup, names: &[&str]) -> DebugPayload {
        let mut payload = DebugPayload::new("Service", "svc1");
        for name in names {
            payload.related.group_mut(group).push(ResourceRef::new(*name));
        }
        payload
    }

    #[test]
    fn test_qualified_id_restricts_kind() {
        let mut payload = payload_with(RelationGroup::ConfigMaps, &["x"]);
        payload
            .related
            .group_mut(RelationGroup::Secrets)
            .push(ResourceRef::new("x"));

        let resolved = resolve_node("secret/x", &payload).unwrap();
        assert_eq!(resolved.kind, ResourceKind::Secret);
        assert!(resolve_node("pod/x", &payload).is_none());
    }

    #[test]
    fn test_legacy_entries_resolve_as_services() {
        let mut payload = DebugPayload::new("Service", "svc1");
        payload.graph = Some(LegacyGraph {
            connections: vec![ResourceRef::new("svcX")],
            ..Default::default()
        });

        let resolved = resolve_node("svcX", &payload).unwrap();
        assert_eq!(resolved.kind, ResourceKind::Service);
        assert_eq!(resolved.target().to_string(), "service/svcX");
    }

    #[test]
    fn test_focal_node_does_not_resolve() {
        let payload = payload_with(RelationGroup::Pods, &["p1"]);
        assert!(resolve_node("svc1", &payload).is_none());
    }
}
