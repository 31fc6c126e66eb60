//! A container opened for browsing.
//!
//! The session owns the container, the navigator and everything shown for
//! the current location. A navigation builds the new location completely
//! before anything is replaced, so a failure leaves the previous state as it
//! was.

use std::path::Path;

use crate::config::ViewerConfig;
use crate::container::{Container, NetcdfContainer, ObjectKind};
use crate::data::{read_attributes, AttributeRow, Cell, DatasetView};
use crate::error::Result;
use crate::navigation::{list_tree, NavMode, Navigator, PathHandler, TreeEntry};

/// An object looked at without necessarily moving there.
#[derive(Debug, Clone)]
pub struct Inspection {
    /// Canonical path.
    pub path: String,
    /// Object kind.
    pub kind: ObjectKind,
    /// Attribute table.
    pub attributes: Vec<AttributeRow>,
    /// Loaded data, for datasets.
    pub dataset: Option<DatasetView>,
}

/// The current location.
#[derive(Debug, Clone)]
pub struct Location {
    /// The object itself.
    pub object: Inspection,
    /// Object tree below it, for the root and groups.
    pub entries: Vec<TreeEntry>,
}

/// Collects whatever the dispatched handler loaded.
struct Loader<'a> {
    container: &'a dyn Container,
    max_tree_depth: usize,
    with_tree: bool,
    loaded: Option<Location>,
}

impl Loader<'_> {
    fn load(&mut self, canonical: &str, kind: ObjectKind, dataset: Option<DatasetView>) {
        let entries = if self.with_tree && kind.is_group_like() {
            list_tree(self.container, canonical, self.max_tree_depth)
        } else {
            Vec::new()
        };
        self.loaded = Some(Location {
            object: Inspection {
                path: canonical.to_string(),
                kind,
                attributes: read_attributes(self.container, canonical),
                dataset,
            },
            entries,
        });
    }
}

impl PathHandler for Loader<'_> {
    fn on_root(&mut self, canonical: &str) -> Result<()> {
        self.load(canonical, ObjectKind::Root, None);
        Ok(())
    }

    fn on_group(&mut self, canonical: &str) -> Result<()> {
        self.load(canonical, ObjectKind::Group, None);
        Ok(())
    }

    fn on_dataset(&mut self, canonical: &str) -> Result<()> {
        let view = DatasetView::open(self.container, canonical)?;
        self.load(canonical, ObjectKind::Dataset, Some(view));
        Ok(())
    }

    fn on_not_found(&mut self, _path: &str) {
        self.loaded = None;
    }
}

/// A container being browsed.
#[derive(Debug)]
pub struct Session {
    container: Box<dyn Container>,
    navigator: Navigator,
    location: Location,
    config: ViewerConfig,
}

impl Session {
    /// Open a netCDF-4 / HDF5 file and move to its root.
    pub fn open_file(path: &Path, config: ViewerConfig) -> Result<Self> {
        tracing::info!("Opening {}", path.display());
        let container = NetcdfContainer::open(path)?;
        Self::new(Box::new(container), config)
    }

    /// Start browsing `container` at its root.
    pub fn new(container: Box<dyn Container>, config: ViewerConfig) -> Result<Self> {
        let mut navigator = Navigator::new();
        let mut loader = Loader {
            container: container.as_ref(),
            max_tree_depth: config.max_tree_depth,
            with_tree: true,
            loaded: None,
        };
        navigator.navigate(container.as_ref(), "/", NavMode::Normal, &mut loader)?;
        let location = match loader.loaded {
            Some(location) => location,
            None => {
                return Err(crate::error::PadError::Container(
                    "container has no root".to_string(),
                ))
            },
        };

        Ok(Self {
            container,
            navigator,
            location,
            config,
        })
    }

    /// The container.
    pub fn container(&self) -> &dyn Container {
        self.container.as_ref()
    }

    /// Name of the container.
    pub fn name(&self) -> String {
        self.container.name()
    }

    /// The current location.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Canonical path of the current location.
    pub fn current_path(&self) -> &str {
        &self.location.object.path
    }

    /// Navigation state.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Session settings.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    fn run<F>(&mut self, step: F) -> Result<Option<String>>
    where
        F: FnOnce(&mut Navigator, &dyn Container, &mut dyn PathHandler) -> Result<Option<String>>,
    {
        let mut loader = Loader {
            container: self.container.as_ref(),
            max_tree_depth: self.config.max_tree_depth,
            with_tree: true,
            loaded: None,
        };
        let canonical = step(&mut self.navigator, self.container.as_ref(), &mut loader)?;
        if let Some(location) = loader.loaded {
            self.location = location;
        }
        Ok(canonical)
    }

    /// Move to `path`; `None` if nothing lives there.
    pub fn navigate(&mut self, path: &str) -> Result<Option<String>> {
        self.run(|nav, container, handler| nav.navigate(container, path, NavMode::Normal, handler))
    }

    /// Step back through history.
    pub fn back(&mut self) -> Result<Option<String>> {
        self.run(|nav, container, handler| nav.back(container, handler))
    }

    /// Step forward through history.
    pub fn forward(&mut self) -> Result<Option<String>> {
        self.run(|nav, container, handler| nav.forward(container, handler))
    }

    /// Move to the parent of the current location.
    pub fn go_up(&mut self) -> Result<Option<String>> {
        self.run(|nav, container, handler| nav.go_up(container, handler))
    }

    /// Move to the target of a reference cell.
    pub fn follow(&mut self, cell: &Cell) -> Result<Option<String>> {
        match &cell.target {
            Some(target) => self.navigate(&target.path),
            None => Ok(None),
        }
    }

    /// Look at `path` without moving there; `None` if nothing lives there.
    pub fn inspect(&self, path: &str) -> Result<Option<Inspection>> {
        let mut loader = Loader {
            container: self.container.as_ref(),
            max_tree_depth: self.config.max_tree_depth,
            with_tree: false,
            loaded: None,
        };
        crate::navigation::handle_path(self.container.as_ref(), path, &mut loader)?;
        Ok(loader.loaded.map(|location| location.object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::MemoryContainer;
    use crate::data::ElementType;

    fn session() -> Session {
        let container = MemoryContainer::builder("s.h5")
            .group("grp")
            .dataset("grp/m", &[2, 2], ElementType::int(4), vec![0; 16])
            .string_attribute("grp/m", "units", "m")
            .build();
        Session::new(Box::new(container), ViewerConfig::default()).unwrap()
    }

    #[test]
    fn starts_at_root_with_tree() {
        let s = session();
        assert_eq!(s.current_path(), "/");
        assert_eq!(s.location().object.kind, ObjectKind::Root);
        assert_eq!(s.location().entries[0].path, "/grp");
    }

    #[test]
    fn dataset_location_carries_data() {
        let mut s = session();
        assert_eq!(s.navigate("grp/m").unwrap().as_deref(), Some("/grp/m"));
        let object = &s.location().object;
        assert_eq!(object.attributes[0].value.as_deref(), Some("m"));
        assert_eq!(object.dataset.as_ref().map(|d| d.page_count()), Some(1));
    }

    #[test]
    fn unknown_path_keeps_location() {
        let mut s = session();
        s.navigate("/grp").unwrap();
        assert_eq!(s.navigate("/missing").unwrap(), None);
        assert_eq!(s.current_path(), "/grp");
    }

    #[test]
    fn inspect_does_not_move() {
        let s = session();
        let seen = s.inspect("/grp/m").unwrap().unwrap();
        assert_eq!(seen.kind, ObjectKind::Dataset);
        assert!(seen.dataset.is_some());
        assert_eq!(s.current_path(), "/");
        assert!(s.inspect("/nothing").unwrap().is_none());
    }

    #[test]
    fn up_back_forward() {
        let mut s = session();
        s.navigate("/grp/m").unwrap();
        s.go_up().unwrap();
        assert_eq!(s.current_path(), "/grp");
        s.back().unwrap();
        assert_eq!(s.current_path(), "/grp/m");
        s.forward().unwrap();
        assert_eq!(s.current_path(), "/grp");
    }
}
