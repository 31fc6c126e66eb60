//! End-to-end browsing over an in-memory container.

use h5pad::config::ViewerConfig;
use h5pad::container::{Container, MemoryContainer, ObjectKind};
use h5pad::data::decoder::{CHAR_CLASS_ATTRIBUTE, CHAR_CLASS_VALUE};
use h5pad::data::{CompoundMember, DatasetView, ElementType};
use h5pad::navigation::{list_tree, MAX_TREE_DEPTH};
use h5pad::session::Session;

fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// A file shaped like a MATLAB v7.3 save: a cell array of references into
/// `#refs#`, one of which is a char array.
fn matlab_like() -> MemoryContainer {
    let mut builder = MemoryContainer::builder("saved.mat");
    builder
        .dataset("#refs#/a", &[5, 1], ElementType::uint(2), utf16("hello"))
        .string_attribute("#refs#/a", CHAR_CLASS_ATTRIBUTE, CHAR_CLASS_VALUE)
        .dataset(
            "#refs#/b",
            &[2, 2],
            ElementType::float(8),
            [1.0f64, 2.0, 3.0, 4.0].iter().flat_map(|v| v.to_ne_bytes()).collect(),
        );
    let a = builder.reference_to("#refs#/a").unwrap();
    let b = builder.reference_to("#refs#/b").unwrap();
    let group = builder.reference_to("#refs#").unwrap();
    let mut cells = Vec::new();
    cells.extend_from_slice(&a);
    cells.extend_from_slice(&b);
    cells.extend_from_slice(&group);
    cells.extend_from_slice(&999u64.to_le_bytes());
    builder
        .dataset("cells", &[1, 4], ElementType::Reference { size: 8 }, cells)
        .string_attribute("cells", "MATLAB_class", "cell");
    builder.build()
}

fn open(container: MemoryContainer) -> Session {
    Session::new(Box::new(container), ViewerConfig::default()).unwrap()
}

#[test]
fn reference_cells_show_text_or_path() {
    let mut session = open(matlab_like());
    session.navigate("cells").unwrap();
    let view = session.location().object.dataset.as_ref().unwrap();
    let page = view.render_page(0, session.container());

    let texts: Vec<&str> = page.rows[0].iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["hello", "/#refs#/b", "/#refs#", ""]);
    assert_eq!(page.rows[0][2].target.as_ref().unwrap().kind, ObjectKind::Group);
    assert_eq!(page.failures.len(), 1);
    assert_eq!((page.failures[0].row, page.failures[0].col), (0, 3));
}

#[test]
fn following_a_reference_opens_the_target() {
    let mut session = open(matlab_like());
    session.navigate("/cells").unwrap();
    let cell = {
        let view = session.location().object.dataset.as_ref().unwrap();
        view.render_page(0, session.container()).rows[0][1].clone()
    };
    assert_eq!(session.follow(&cell).unwrap().as_deref(), Some("/#refs#/b"));

    let view = session.location().object.dataset.as_ref().unwrap();
    assert_eq!(view.type_label(), "Float: 2×2");
    let page = view.render_page(0, session.container());
    assert_eq!(page.rows[1][1].text, "4");

    session.back().unwrap();
    assert_eq!(session.current_path(), "/cells");
}

#[test]
fn char_array_dataset_exposes_text() {
    let mut session = open(matlab_like());
    session.navigate("/#refs#/a").unwrap();
    let view = session.location().object.dataset.as_ref().unwrap();
    assert_eq!(view.text(), Some("hello"));
}

#[test]
fn history_walk() {
    let mut session = open(matlab_like());
    for path in ["/#refs#", "/#refs#/a", "/cells"] {
        session.navigate(path).unwrap();
    }
    session.back().unwrap();
    assert_eq!(session.current_path(), "/#refs#/a");
    session.back().unwrap();
    assert_eq!(session.current_path(), "/#refs#");
    session.forward().unwrap();
    session.forward().unwrap();
    assert_eq!(session.current_path(), "/cells");
    assert_eq!(session.navigator().history().forward_len(), 0);
    assert_eq!(session.navigator().history().back_len(), 3);
}

#[test]
fn compound_records_and_pages() {
    let record = ElementType::Compound {
        size: 8,
        members: vec![
            CompoundMember::new("id", 0, ElementType::uint(2)),
            CompoundMember::new("temp", 4, ElementType::float(4)),
            CompoundMember::new("spill", 6, ElementType::float(4)),
        ],
    };
    let mut data = Vec::new();
    for i in 0..12u16 {
        data.extend_from_slice(&i.to_ne_bytes());
        data.extend_from_slice(&[0, 0]);
        data.extend_from_slice(&(f32::from(i) / 2.0).to_ne_bytes());
    }
    let mut builder = MemoryContainer::builder("records.h5");
    builder.dataset("obs", &[3, 2, 2], record, data);
    let mut session = open(builder.build());

    session.navigate("obs").unwrap();
    let view = session.location().object.dataset.as_ref().unwrap();
    assert_eq!(view.page_count(), 3);
    assert_eq!(view.page_labels(10), vec!["[0,:,:]", "[1,:,:]", "[2,:,:]"]);

    let page = view.render_page(2, session.container());
    assert_eq!(page.rows[0][1].text, "{9,4.5,?}");
}

#[test]
fn short_buffer_clamps_pages() {
    let mut builder = MemoryContainer::builder("short.h5");
    // declared 4 pages of 2x2 i32, but only 1.5 pages of bytes
    builder.dataset("x", &[4, 2, 2], ElementType::int(4), vec![1; 24]);
    let mut session = open(builder.build());
    session.navigate("x").unwrap();

    let view = session.location().object.dataset.as_ref().unwrap();
    assert_eq!(view.page_count(), 2);
    let page = view.render_page(1, session.container());
    let filled = page.rows.iter().flatten().filter(|c| !c.text.is_empty()).count();
    assert_eq!(filled, 2);
    assert!(page.failures.is_empty());
}

#[test]
fn attribute_listing_survives_bad_rows() {
    let mut builder = MemoryContainer::builder("attrs.h5");
    builder
        .group("g")
        .attribute("g", "dangling", ElementType::Reference { size: 8 }, 1, 77u64.to_le_bytes().to_vec())
        .attribute("g", "scale", ElementType::float(8), 1, 0.5f64.to_ne_bytes().to_vec());
    let container = builder.build();
    assert_eq!(container.attribute_names("/g").unwrap(), vec!["dangling", "scale"]);

    let session = open(container);
    let seen = session.inspect("/g").unwrap().unwrap();
    assert_eq!(seen.attributes[0].value.as_deref(), Some(""));
    assert_eq!(seen.attributes[1].value.as_deref(), Some("0.5"));
}

/// Wraps a container, counts bulk reads and, like variable-length string
/// storage, only learns string widths when the data is read.
#[derive(Debug)]
struct ReadCounter {
    inner: MemoryContainer,
    reads: std::cell::Cell<usize>,
}

impl Container for ReadCounter {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn classify(&self, path: &str) -> h5pad::Result<ObjectKind> {
        self.inner.classify(path)
    }

    fn canonical_path(&self, path: &str) -> h5pad::Result<String> {
        self.inner.canonical_path(path)
    }

    fn list_children(&self, path: &str) -> h5pad::Result<Vec<String>> {
        self.inner.list_children(path)
    }

    fn dimensions(&self, path: &str) -> h5pad::Result<Vec<usize>> {
        self.inner.dimensions(path)
    }

    fn element_type(&self, path: &str) -> h5pad::Result<ElementType> {
        Ok(match self.inner.element_type(path)? {
            ElementType::String { .. } => ElementType::string(0),
            other => other,
        })
    }

    fn read_raw(&self, path: &str) -> h5pad::Result<Vec<u8>> {
        self.reads.set(self.reads.get() + 1);
        self.inner.read_raw(path)
    }

    fn read_typed(&self, path: &str) -> h5pad::Result<(ElementType, Vec<u8>)> {
        self.reads.set(self.reads.get() + 1);
        Ok((self.inner.element_type(path)?, self.inner.read_raw(path)?))
    }

    fn attribute_names(&self, path: &str) -> h5pad::Result<Vec<String>> {
        self.inner.attribute_names(path)
    }

    fn attribute(&self, path: &str, name: &str) -> h5pad::Result<h5pad::container::RawAttribute> {
        self.inner.attribute(path, name)
    }

    fn resolve_reference(&self, handle: &[u8]) -> h5pad::Result<h5pad::container::ObjectRef> {
        self.inner.resolve_reference(handle)
    }
}

#[test]
fn listing_reads_no_data_and_opening_reads_once() {
    let container = ReadCounter {
        inner: MemoryContainer::builder("strings.nc")
            .dataset("grp/names", &[2], ElementType::string(3), b"abcde\0".to_vec())
            .build(),
        reads: std::cell::Cell::new(0),
    };

    let tree = list_tree(&container, "/", MAX_TREE_DEPTH);
    assert_eq!(tree[0].children[0].label, "Dataset(String: 2)");
    assert_eq!(container.reads.get(), 0);

    let view = DatasetView::open(&container, "/grp/names").unwrap();
    assert_eq!(container.reads.get(), 1);
    assert_eq!(view.element_type(), &ElementType::string(3));
    let page = view.render_page(0, &container);
    assert_eq!(page.rows[0][0].text, "abc");
    assert_eq!(page.rows[0][1].text, "de");
}
