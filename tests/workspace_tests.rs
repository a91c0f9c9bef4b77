//! End-to-end tests of the workspace catalog, filter, mutator and session working together
//! on real temporary directories.

use gotry_tui::app::{Action, Command, Event, Input, Mode, Outcome, Session};
use gotry_tui::core::{
    create_entry, delete_entries, filter_entries, list_entries, sanitize_name, unused_path,
};

use chrono::Local;
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn key(s: &mut Session, action: Action) -> Command {
    s.handle(Event::Key(Input::Action(action)))
}

fn type_text(s: &mut Session, text: &str) {
    for ch in text.chars() {
        s.handle(Event::Key(Input::Char(ch)));
    }
}

fn loaded(base: &Path) -> Result<Session, Box<dyn std::error::Error>> {
    let mut s = Session::new(base, "");
    s.handle(Event::CatalogLoaded(list_entries(base)?));
    Ok(s)
}

#[test]
fn create_then_list_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let mut rng = rng();

    for case in 0..10 {
        let len = rng.random_range(1..12);
        let word: String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect();
        let raw = format!("Try {word}");

        let base = tmp.path().join(format!("case-{case}"));
        let path = create_entry(&base, &raw)?;
        let entries = list_entries(&base)?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path(), path);
        assert_eq!(entries[0].label(), sanitize_name(&raw));
        // today may roll over between the two calls only at midnight
        assert_eq!(entries[0].date_prefix(), Some(today.as_str()));
    }
    Ok(())
}

#[test]
fn create_never_overwrites() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let first = create_entry(tmp.path(), "same")?;
    let second = create_entry(tmp.path(), "same")?;
    let third = create_entry(tmp.path(), "same")?;

    let name = |p: &Path| p.file_name().map(|n| n.to_string_lossy().into_owned());
    let first_name = name(&first).ok_or("no name")?;
    assert_eq!(name(&second), Some(format!("{first_name}-2")));
    assert_eq!(name(&third), Some(format!("{first_name}-3")));
    assert_eq!(unused_path(&first), tmp.path().join(format!("{first_name}-4")));
    Ok(())
}

#[test]
fn missing_base_lists_empty() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    assert!(list_entries(&tmp.path().join("not-yet"))?.is_empty());
    Ok(())
}

#[test]
fn empty_query_keeps_recency_order() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    for name in ["a", "b", "c", "d"] {
        fs::create_dir(tmp.path().join(name))?;
    }
    let entries = list_entries(tmp.path())?;
    assert_eq!(filter_entries("", &entries), entries);
    Ok(())
}

#[test]
fn cursor_clamps_at_bottom() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    for name in ["one", "two", "three", "four"] {
        fs::create_dir(tmp.path().join(name))?;
    }
    let mut s = loaded(tmp.path())?;
    let len = s.visible().len();
    for _ in 0..len {
        key(&mut s, Action::Down);
    }
    assert_eq!(s.cursor(), len - 1);
    Ok(())
}

#[test]
fn mark_confirm_and_delete_exactly_the_marked() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    for name in ["2024-01-01-keep", "2024-01-02-drop", "2024-01-03-also"] {
        fs::create_dir(tmp.path().join(name))?;
    }
    let mut s = loaded(tmp.path())?;
    let expected = vec![
        s.visible()[0].path().to_path_buf(),
        s.visible()[2].path().to_path_buf(),
    ];
    let survivor = s.visible()[1].path().to_path_buf();

    key(&mut s, Action::Delete);
    key(&mut s, Action::ToggleMark);
    key(&mut s, Action::Down);
    key(&mut s, Action::Down);
    key(&mut s, Action::ToggleMark);
    key(&mut s, Action::Select);
    assert_eq!(s.mode(), Mode::Confirm);
    assert_eq!(s.marked().len(), 2);

    // lowercase is uppercased on entry, so only a wrong word keeps the gate closed
    type_text(&mut s, "no");
    assert_eq!(key(&mut s, Action::Select), Command::None);
    assert!(expected.iter().all(|p| p.exists()));

    key(&mut s, Action::Cancel);
    assert_eq!(s.mode(), Mode::Delete);
    assert_eq!(s.marked().len(), 2);
    key(&mut s, Action::Select);

    type_text(&mut s, "YES");
    let Command::Delete(paths) = key(&mut s, Action::Select) else {
        panic!("expected a delete command");
    };
    assert_eq!(paths, expected);
    assert_eq!(s.mode(), Mode::Normal);
    assert!(s.marked().is_empty());

    assert_eq!(delete_entries(&paths, false)?, 2);
    assert_eq!(s.handle(Event::DeleteFinished(Ok(2))), Command::Reload);
    s.handle(Event::CatalogLoaded(list_entries(tmp.path())?));
    assert_eq!(s.visible().len(), 1);
    assert_eq!(s.visible()[0].path(), survivor);
    Ok(())
}

#[test]
fn escape_from_normal_cancels() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    fs::create_dir(tmp.path().join("x"))?;
    let mut s = loaded(tmp.path())?;
    assert_eq!(key(&mut s, Action::Cancel), Command::Quit);
    assert_eq!(s.into_outcome(), None);
    Ok(())
}

#[test]
fn typed_name_without_match_becomes_create_request() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    fs::create_dir(tmp.path().join("2024-01-01-alpha"))?;
    let mut s = loaded(tmp.path())?;
    type_text(&mut s, "Quantum Thing");
    assert!(s.visible().is_empty());
    key(&mut s, Action::Select);

    let outcome = s.into_outcome().ok_or("expected an outcome")?;
    assert_eq!(outcome.to_string(), "CREATE:Quantum Thing");
    assert_eq!(
        Outcome::from_line(&outcome.to_string()),
        Some(Outcome::Create("Quantum Thing".into()))
    );
    Ok(())
}
