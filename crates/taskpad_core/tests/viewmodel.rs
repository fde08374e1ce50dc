use taskpad_core::{
    FilterMode, StoreHandle, TaskFilter, TaskListViewModel, TaskRepository, TaskValidationError,
};

fn view_model() -> TaskListViewModel {
    let store = StoreHandle::open_in_memory().unwrap();
    TaskListViewModel::new(TaskRepository::new(store))
}

#[tokio::test]
async fn blank_title_never_reaches_the_store() {
    let vm = view_model();

    let err = vm.add("", None).unwrap_err();
    assert_eq!(err, TaskValidationError::BlankTitle);
    let err = vm.add("   ", Some("desc alone is not enough".to_string())).unwrap_err();
    assert_eq!(err, TaskValidationError::BlankTitle);

    assert!(vm.tasks().is_empty());
}

#[tokio::test]
async fn add_updates_the_watched_list() {
    let mut vm = view_model();

    vm.add("first", None).unwrap().wait().await.unwrap();

    let tasks = vm.tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "first");
    assert!(!tasks[0].is_done);

    vm.add("second", None).unwrap().wait().await.unwrap();
    vm.changed().await.ok();
    assert_eq!(vm.tasks().len(), 2);
}

#[tokio::test]
async fn save_rejects_an_edit_that_clears_the_title() {
    let vm = view_model();
    vm.add("keep me", None).unwrap().wait().await.unwrap();

    let mut edited = vm.tasks().remove(0);
    edited.title = "  ".to_string();
    let err = vm.save(edited).unwrap_err();
    assert_eq!(err, TaskValidationError::BlankTitle);

    assert_eq!(vm.tasks()[0].title, "keep me");
}

#[tokio::test]
async fn set_done_moves_tasks_between_filters() {
    let mut vm = view_model();
    vm.add("toggle", None).unwrap().wait().await.unwrap();
    vm.add("stays open", None).unwrap().wait().await.unwrap();

    let target = vm.tasks()[0].clone();
    vm.set_done(&target, true).wait().await.unwrap();

    vm.set_filter(FilterMode::Complete);
    let complete = vm.tasks();
    assert_eq!(complete.len(), 1);
    assert_eq!(complete[0].title, "toggle");

    vm.set_filter(FilterMode::Incomplete);
    let incomplete = vm.tasks();
    assert_eq!(incomplete.len(), 1);
    assert_eq!(incomplete[0].title, "stays open");
}

#[tokio::test]
async fn filter_cycle_returns_the_original_full_list() {
    let mut vm = view_model();
    vm.add("a", None).unwrap().wait().await.unwrap();
    vm.add("b", None).unwrap().wait().await.unwrap();
    let done = vm.tasks()[1].clone();
    vm.set_done(&done, true).wait().await.unwrap();

    assert_eq!(vm.filter(), FilterMode::All);
    let before: Vec<_> = vm.tasks().into_iter().map(|t| t.id).collect();

    vm.set_filter(FilterMode::Incomplete);
    vm.set_filter(FilterMode::Complete);
    vm.set_filter(FilterMode::All);

    let after: Vec<_> = vm.tasks().into_iter().map(|t| t.id).collect();
    assert_eq!(before, after);
}

#[tokio::test]
async fn remove_clears_the_task_from_every_filter() {
    let mut vm = view_model();
    vm.add("doomed", None).unwrap().wait().await.unwrap();
    let id = vm.tasks()[0].id.unwrap();

    vm.remove(id).wait().await.unwrap();

    for mode in [FilterMode::All, FilterMode::Incomplete, FilterMode::Complete] {
        vm.set_filter(mode);
        assert!(vm.tasks().is_empty(), "task still visible under {mode:?}");
    }

    // Removing again is a no-op.
    vm.remove(id).wait().await.unwrap();
}

#[tokio::test]
async fn view_model_reads_through_to_shared_store_state() {
    let store = StoreHandle::open_in_memory().unwrap();
    let repo = TaskRepository::new(store.clone());
    let vm = TaskListViewModel::new(repo);

    // A write through another handle clone still shows up in the view-model.
    store
        .insert(taskpad_core::Task::new("from elsewhere", None))
        .wait()
        .await
        .unwrap();

    assert_eq!(vm.tasks().len(), 1);
    assert_eq!(
        store.list(TaskFilter::All).await.unwrap().len(),
        vm.tasks().len()
    );
}
