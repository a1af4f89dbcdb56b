use dragdo::controller::{Controller, Gesture};
use dragdo::model::TodoId;
use dragdo::storage::MemoryStorage;
use dragdo::store::TodoList;
use dragdo::view::{DEFAULT_EMPTY_MESSAGE, ListView, NullRenderer};

fn setup<'a>(
    storage: &'a MemoryStorage,
    names: &[&str],
) -> TodoList<&'a MemoryStorage, NullRenderer> {
    let mut list = TodoList::load(storage, NullRenderer);
    for name in names {
        list.add(name).unwrap();
    }
    list
}

fn contents(list: &TodoList<&MemoryStorage, NullRenderer>) -> Vec<String> {
    list.items().iter().map(|t| t.content.clone()).collect()
}

#[test]
fn test_add_form_closes_only_on_success() {
    let storage = MemoryStorage::default();
    let mut list = setup(&storage, &[]);
    let mut ctl = Controller::new();

    assert!(ctl.handle(&mut list, Gesture::OpenAddForm));
    assert!(!ctl.handle(&mut list, Gesture::SubmitAdd("  ".into())));
    assert!(ctl.ui().add_form_open);

    assert!(ctl.handle(&mut list, Gesture::SubmitAdd("Task".into())));
    assert!(!ctl.ui().add_form_open);
    assert_eq!(contents(&list), vec!["Task"]);

    ctl.handle(&mut list, Gesture::OpenAddForm);
    assert!(ctl.handle(&mut list, Gesture::CancelAdd));
    assert!(!ctl.ui().add_form_open);
}

#[test]
fn test_edit_flow() {
    let storage = MemoryStorage::default();
    let mut list = setup(&storage, &["A", "B"]);
    let mut ctl = Controller::new();
    let id = list.items()[0].id;

    assert!(!ctl.handle(&mut list, Gesture::BeginEdit(TodoId(-5))));
    assert!(ctl.ui().editing.is_none());
    assert!(!ctl.handle(&mut list, Gesture::SubmitEdit("x".into())));

    assert!(ctl.handle(&mut list, Gesture::BeginEdit(id)));
    assert!(!ctl.handle(&mut list, Gesture::SubmitEdit(" ".into())));
    assert_eq!(ctl.ui().editing, Some(id));

    assert!(ctl.handle(&mut list, Gesture::SubmitEdit("A2".into())));
    assert!(ctl.ui().editing.is_none());
    assert_eq!(contents(&list), vec!["A2", "B"]);
}

#[test]
fn test_deleting_edited_item_closes_form() {
    let storage = MemoryStorage::default();
    let mut list = setup(&storage, &["A"]);
    let mut ctl = Controller::new();
    let id = list.items()[0].id;

    ctl.handle(&mut list, Gesture::BeginEdit(id));
    assert!(ctl.handle(&mut list, Gesture::Delete(id)));
    assert!(ctl.ui().editing.is_none());
    assert!(list.is_empty());

    let view = ctl.view(&list, DEFAULT_EMPTY_MESSAGE);
    assert!(matches!(view.list, ListView::Empty { .. }));
    assert!(!view.edit_form_open);
}

#[test]
fn test_drag_then_drop_reorders() {
    let storage = MemoryStorage::default();
    let mut list = setup(&storage, &["A", "B", "C"]);
    let mut ctl = Controller::new();

    assert!(ctl.handle(&mut list, Gesture::DragStart(0)));
    assert!(ctl.handle(&mut list, Gesture::DragEnter(2)));
    let view = ctl.view(&list, DEFAULT_EMPTY_MESSAGE);
    assert!(view.list.rows()[0].dragging);
    assert!(view.list.rows()[2].drag_over);

    assert!(ctl.handle(&mut list, Gesture::Drop(2)));
    assert_eq!(contents(&list), vec!["B", "A", "C"]);
    assert!(ctl.ui().drag_source.is_none());
    assert!(ctl.ui().drag_over.is_none());
}

#[test]
fn test_drop_without_drag_is_ignored() {
    let storage = MemoryStorage::default();
    let mut list = setup(&storage, &["A", "B"]);
    let mut ctl = Controller::new();

    assert!(!ctl.handle(&mut list, Gesture::Drop(1)));
    assert!(!ctl.handle(&mut list, Gesture::DragEnter(1)));
    assert!(!ctl.handle(&mut list, Gesture::DragStart(9)));

    ctl.handle(&mut list, Gesture::DragStart(1));
    assert!(ctl.handle(&mut list, Gesture::DragEnd));
    assert!(!ctl.handle(&mut list, Gesture::Drop(0)));
    assert_eq!(contents(&list), vec!["A", "B"]);
}

#[test]
fn test_toggle_through_controller_persists() {
    let storage = MemoryStorage::default();
    let mut list = setup(&storage, &["A"]);
    let mut ctl = Controller::new();
    let id = list.items()[0].id;

    assert!(ctl.handle(&mut list, Gesture::Toggle(id)));
    assert!(!ctl.handle(&mut list, Gesture::Toggle(TodoId(-1))));

    let reloaded = TodoList::load(&storage, NullRenderer);
    assert!(reloaded.items()[0].completed);
}
