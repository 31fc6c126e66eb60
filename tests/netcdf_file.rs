//! Browsing a real netCDF-4 file written to a temporary directory.

use std::path::Path;

use h5pad::config::ViewerConfig;
use h5pad::container::ObjectKind;
use h5pad::data::{DatasetView, ElementType};
use h5pad::session::Session;

/// Root: `title` attribute, `grid` (i32, 2×3) and group `grp` holding a
/// string variable and a float variable.
fn write_sample(path: &Path) -> netcdf::Result<()> {
    let mut file = netcdf::create(path)?;
    file.add_attribute("title", "sample")?;
    file.add_dimension("x", 2)?;
    file.add_dimension("y", 3)?;

    {
        let mut grid = file.add_variable::<i32>("grid", &["x", "y"])?;
        grid.put_values(&[0i32, 1, 2, 3, 4, 5], ..)?;
        grid.put_attribute("units", "m")?;
        grid.put_attribute("scale", 0.5f64)?;
    }

    file.add_group("grp")?;
    {
        let mut names = file.add_string_variable("grp/names", &["x"])?;
        names.put_string("ab", 0usize)?;
        names.put_string("cde", 1usize)?;
    }
    {
        let mut temps = file.add_variable::<f64>("grp/temps", &["y"])?;
        temps.put_values(&[1.5, 6.02214076e23, -2.0], ..)?;
    }
    Ok(())
}

fn open_sample() -> (tempfile::TempDir, Session) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.nc");
    write_sample(&path).unwrap();
    let session = Session::open_file(&path, ViewerConfig::default()).unwrap();
    (dir, session)
}

fn shown(session: &Session) -> &DatasetView {
    session.location().object.dataset.as_ref().unwrap()
}

#[test]
fn root_lists_tree_and_attributes() {
    let (_dir, session) = open_sample();
    assert_eq!(session.name(), "sample.nc");
    assert_eq!(session.current_path(), "/");

    let root = &session.location().object;
    assert_eq!(root.kind, ObjectKind::Root);
    assert_eq!(root.attributes[0].name, "title");
    assert_eq!(root.attributes[0].value.as_deref(), Some("sample"));

    let entries = &session.location().entries;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].path, "/grp");
    assert_eq!(entries[0].label, "Group");
    assert_eq!(entries[0].children[0].label, "Dataset(String: 2)");
    assert_eq!(entries[0].children[1].label, "Dataset(Float: 3)");
    assert_eq!(entries[1].path, "/grid");
    assert_eq!(entries[1].label, "Dataset(Integer: 2×3)");
}

#[test]
fn integer_variable_renders_with_attributes() {
    let (_dir, mut session) = open_sample();
    assert_eq!(session.navigate("grid").unwrap().as_deref(), Some("/grid"));

    let object = &session.location().object;
    let values: Vec<(&str, Option<&str>)> = object
        .attributes
        .iter()
        .map(|row| (row.name.as_str(), row.value.as_deref()))
        .collect();
    assert_eq!(values, vec![("units", Some("m")), ("scale", Some("0.5"))]);

    let view = shown(&session);
    assert_eq!(view.element_type(), &ElementType::int(4));
    assert_eq!(view.page_shape(), (2, 3));
    let page = view.render_page(0, session.container());
    assert_eq!(page.rows[0][0].text, "0");
    assert_eq!(page.rows[1][2].text, "5");
}

#[test]
fn string_variable_is_padded_to_longest() {
    let (_dir, mut session) = open_sample();
    session.navigate("/grp/names").unwrap();

    let view = shown(&session);
    assert_eq!(view.element_type(), &ElementType::string(3));
    let page = view.render_page(0, session.container());
    assert_eq!(page.rows[0][0].text, "ab");
    assert_eq!(page.rows[0][1].text, "cde");
}

#[test]
fn float_variable_and_navigation() {
    let (_dir, mut session) = open_sample();
    session.navigate("/grp/temps").unwrap();

    let page = shown(&session).render_page(0, session.container());
    let texts: Vec<&str> = page.rows[0].iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["1.5", "6.02214e+23", "-2"]);

    assert_eq!(session.go_up().unwrap().as_deref(), Some("/grp"));
    assert_eq!(session.location().object.kind, ObjectKind::Group);
    assert_eq!(session.location().entries.len(), 2);

    assert_eq!(session.navigate("/missing").unwrap(), None);
    assert_eq!(session.navigate("/missing/deeper").unwrap(), None);
    assert_eq!(session.current_path(), "/grp");
}
