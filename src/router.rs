//! Client-side routes of the application.

use ahash::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    Game,
    Games,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Static(&'static str),
    Param { name: &'static str, optional: bool },
}

/// A path pattern such as `/game/:gid?`.
#[derive(Clone, Debug)]
pub struct RouteDef {
    pub name: RouteName,
    pub pattern: &'static str,
    segments: Vec<Segment>,
}

impl RouteDef {
    pub fn new(name: RouteName, pattern: &'static str) -> Self {
        let segments = split_path(pattern)
            .map(|segment| match segment.strip_prefix(':') {
                Some(param) => match param.strip_suffix('?') {
                    Some(name) => Segment::Param {
                        name,
                        optional: true,
                    },
                    None => Segment::Param {
                        name: param,
                        optional: false,
                    },
                },
                None => Segment::Static(segment),
            })
            .collect();
        Self {
            name,
            pattern,
            segments,
        }
    }

    fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let mut parts = split_path(path);
        let mut params = HashMap::default();
        for segment in &self.segments {
            match (segment, parts.next()) {
                (Segment::Static(expected), Some(part)) if *expected == part => {}
                (Segment::Param { name, .. }, Some(part)) => {
                    params.insert((*name).to_owned(), part.to_owned());
                }
                (Segment::Param { optional: true, .. }, None) => {}
                _ => return None,
            }
        }
        parts.next().is_none().then_some(params)
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// A resolved route with its parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub name: RouteName,
    pub params: HashMap<String, String>,
}

impl Route {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// The path this route was resolved from (up to trailing slashes).
    pub fn path(&self) -> String {
        match self.name {
            RouteName::Home => "/".to_owned(),
            RouteName::Games => "/games".to_owned(),
            RouteName::Game => match self.param("gid") {
                Some(gid) => format!("/game/{gid}"),
                None => "/game".to_owned(),
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct Router {
    routes: Vec<RouteDef>,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            routes: vec![
                RouteDef::new(RouteName::Home, "/"),
                RouteDef::new(RouteName::Game, "/game/:gid?"),
                RouteDef::new(RouteName::Games, "/games"),
            ],
        }
    }
}

impl Router {
    pub fn routes(&self) -> &[RouteDef] {
        &self.routes
    }

    /// First route matching `path`. Query strings and fragments are ignored.
    pub fn resolve(&self, path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        self.routes.iter().find_map(|def| {
            def.matches(path).map(|params| Route {
                name: def.name,
                params,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_application_routes() {
        let router = Router::default();
        assert_eq!(router.resolve("/").map(|r| r.name), Some(RouteName::Home));
        assert_eq!(router.resolve("/games/").map(|r| r.name), Some(RouteName::Games));

        let game = router.resolve("/game/42?tab=moves").unwrap();
        assert_eq!(game.name, RouteName::Game);
        assert_eq!(game.param("gid"), Some("42"));
        assert_eq!(game.path(), "/game/42");

        let new_game = router.resolve("/game").unwrap();
        assert_eq!(new_game.param("gid"), None);
        assert_eq!(new_game.path(), "/game");
    }

    #[test]
    fn unknown_paths_do_not_resolve() {
        let router = Router::default();
        assert!(router.resolve("/game/42/moves").is_none());
        assert!(router.resolve("/settings").is_none());
    }
}
