//! Route table entries produced by the site generator.

/// Kind of a generated route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum RouteKind {
    /// Rendered page.
    Page,
    /// Redirect declared in the generator's config.
    Redirect,
    /// Endpoints, fallbacks and anything else; ignored.
    #[cfg_attr(feature = "serde", serde(other))]
    Other,
}

/// Structured redirect target.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct RedirectDescriptor {
    /// Where the redirect points; may be missing in malformed tables.
    #[cfg_attr(feature = "serde", serde(default))]
    pub destination: Option<String>,
}

/// Redirect target, either a bare path or a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(untagged))]
pub enum RedirectTarget {
    /// `"redirect": "/about"`.
    Path(String),
    /// `"redirect": { "destination": "/about" }`.
    Descriptor(RedirectDescriptor),
}

/// One entry of the generator's finalized route table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct GeneratorRoute {
    /// Route kind.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: RouteKind,
    /// Site path, e.g. `/faq`.
    pub route: String,
    /// Redirect target for [`RouteKind::Redirect`] routes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub redirect: Option<RedirectTarget>,
}

impl GeneratorRoute {
    /// A page route.
    pub fn page(route: impl Into<String>) -> Self {
        Self {
            kind: RouteKind::Page,
            route: route.into(),
            redirect: None,
        }
    }

    /// A redirect route with a plain destination.
    pub fn redirect(route: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            kind: RouteKind::Redirect,
            route: route.into(),
            redirect: Some(RedirectTarget::Path(destination.into())),
        }
    }

    /// Resolved redirect destination, if any.
    ///
    /// Empty destinations count as unresolved.
    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        let destination = match self.redirect.as_ref()? {
            RedirectTarget::Path(path) => path.as_str(),
            RedirectTarget::Descriptor(descriptor) => descriptor.destination.as_deref()?,
        };
        (!destination.is_empty()).then_some(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_from_path() {
        let route = GeneratorRoute::redirect("/faq", "/about");
        assert_eq!(route.destination(), Some("/about"));
    }

    #[test]
    fn test_destination_from_descriptor() {
        let route = GeneratorRoute {
            kind: RouteKind::Redirect,
            route: "/faq".to_owned(),
            redirect: Some(RedirectTarget::Descriptor(RedirectDescriptor {
                destination: Some("/about".to_owned()),
            })),
        };
        assert_eq!(route.destination(), Some("/about"));
    }

    #[test]
    fn test_destination_missing() {
        let mut route = GeneratorRoute::page("/faq");
        route.kind = RouteKind::Redirect;
        assert_eq!(route.destination(), None);

        route.redirect = Some(RedirectTarget::Descriptor(RedirectDescriptor {
            destination: None,
        }));
        assert_eq!(route.destination(), None);

        route.redirect = Some(RedirectTarget::Path(String::new()));
        assert_eq!(route.destination(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_route_table() {
        let routes: Vec<GeneratorRoute> = serde_json::from_str(
            r#"[
                {"type": "page", "route": "/404"},
                {"type": "redirect", "route": "/faq", "redirect": "/about"},
                {"type": "redirect", "route": "/old", "redirect": {"destination": "/new", "status": 308}},
                {"type": "endpoint", "route": "/rss.xml"}
            ]"#,
        )
        .unwrap();

        assert_eq!(routes[0], GeneratorRoute::page("/404"));
        assert_eq!(routes[1], GeneratorRoute::redirect("/faq", "/about"));
        assert_eq!(routes[2].destination(), Some("/new"));
        assert_eq!(routes[3].kind, RouteKind::Other);
    }
}
