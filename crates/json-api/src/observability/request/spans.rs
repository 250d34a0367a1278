//! Route labels for spans and metrics.

use uuid::Uuid;

/// Path with identifiers replaced by placeholders, e.g. `/carts/{cart}/items/{item}`.
///
/// Cart line ids embed a timestamp, so they are collapsed too to keep label cardinality bounded.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut label = String::from("/");
    let mut previous = "";

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            label.push('/');
        }

        match previous {
            "carts" if Uuid::parse_str(segment).is_ok() => label.push_str("{cart}"),
            "items" if !segment.is_empty() => label.push_str("{item}"),
            _ if Uuid::parse_str(segment).is_ok() => label.push_str("{uuid}"),
            _ => label.push_str(segment),
        }

        previous = segment;
    }

    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_routes_are_unchanged() {
        assert_eq!(route_label("/"), "/");
        assert_eq!(route_label("/search"), "/search");
        assert_eq!(route_label("/products/featured"), "/products/featured");
    }

    #[test]
    fn cart_and_line_ids_are_collapsed() {
        let cart = Uuid::now_v7();

        assert_eq!(route_label(&format!("/carts/{cart}")), "/carts/{cart}");
        assert_eq!(
            route_label(&format!("/carts/{cart}/items/ALV-6-BR-1792670400000")),
            "/carts/{cart}/items/{item}"
        );
        assert_eq!(route_label(&format!("/carts/{cart}/items")), "/carts/{cart}/items");
    }
}
