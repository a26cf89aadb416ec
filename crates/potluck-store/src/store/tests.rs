//! Event Store Tests
//!
//! Mutator semantics, partial-merge behavior and subscriptions.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::models::{
        Assignment, AssignmentStatus, AssignmentUpdate, Category, Collection, Event, EventDetails, MenuItem,
        MenuItemUpdate, Participant, User,
    };
    use crate::patch::EventPatch;
    use crate::store::EventStore;

    fn store_with_event(id: &str) -> EventStore {
        let store = EventStore::new();
        store.set_current_event(Some(Event::skeleton(id)));
        store
    }

    fn bread() -> MenuItem {
        MenuItem::new("Bread", Category::Main, 2)
            .created_by("u1", "Dana")
            .required(true)
    }

    #[test]
    fn test_set_current_event_clears_loading() {
        let store = EventStore::new();
        store.set_loading(true);
        assert!(store.snapshot().is_loading);

        store.set_current_event(Some(Event::skeleton("e1")));

        let state = store.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.current_event.as_ref().unwrap().id, "e1");
    }

    #[test]
    fn test_partial_on_empty_store_builds_skeleton() {
        let store = EventStore::new();
        store.set_loading(true);

        let mut participants = Collection::new();
        participants.insert("p1".to_string(), Participant { name: "Dana".to_string(), joined_at: 1 });
        store.update_current_event_partial(EventPatch::default().with_id("e1").with_participants(participants.clone()));

        let state = store.snapshot();
        let event = state.current_event.as_ref().unwrap();
        assert_eq!(event.id, "e1");
        assert_eq!(event.participants, participants);
        assert!(event.menu_items.is_empty());
        assert!(event.assignments.is_empty());
        assert!(event.user_item_counts.is_empty());
        assert_eq!(event.organizer_id, "");
        assert_eq!(event.organizer_name, "");
        assert!(!state.is_loading);
    }

    #[test]
    fn test_partial_without_id_uses_empty_id() {
        let store = EventStore::new();
        store.update_current_event_partial(EventPatch::default().with_details(EventDetails {
            title: "Picnic".to_string(),
            ..Default::default()
        }));

        let state = store.snapshot();
        let event = state.current_event.as_ref().unwrap();
        assert_eq!(event.id, "");
        assert_eq!(event.details.title, "Picnic");
    }

    #[test]
    fn test_partial_is_shallow_replace() {
        let store = store_with_event("e1");
        store.add_menu_item("a", bread());
        store.add_menu_item("b", MenuItem::new("Wine", Category::Drink, 1));
        store.add_participant("p1", Participant::new("Dana"));

        let mut replacement = Collection::new();
        replacement.insert("c".to_string(), MenuItem::new("Soup", Category::Starter, 1));
        store.update_current_event_partial(EventPatch::default().with_menu_items(replacement.clone()));

        let state = store.snapshot();
        let event = state.current_event.as_ref().unwrap();
        assert_eq!(event.menu_items, replacement, "menuItems must be replaced, not merged");
        assert_eq!(event.id, "e1");
        assert!(event.participants.contains_key("p1"), "absent keys stay untouched");
    }

    #[test]
    fn test_mutators_are_noops_without_event() {
        let store = EventStore::new();
        let before = store.snapshot();

        store.add_menu_item("a", bread());
        store.update_menu_item("a", MenuItemUpdate::quantity(5));
        store.delete_menu_item("a");
        store.add_assignment("x", Assignment::new("a", "u1", "Dana", 1));
        store.update_assignment("x", AssignmentUpdate::default());
        store.delete_assignment("x");
        store.add_participant("p1", Participant::new("Dana"));
        store.remove_participant("p1");

        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert!(store.snapshot().current_event.is_none());
    }

    #[test]
    fn test_update_unknown_item_is_noop() {
        let store = store_with_event("e1");
        let before = store.snapshot();

        store.update_menu_item("ghost", MenuItemUpdate::quantity(3));

        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_add_menu_item_keeps_required_flag() {
        let store = store_with_event("e1");
        store.add_menu_item("i1", bread());

        let state = store.snapshot();
        let item = &state.current_event.as_ref().unwrap().menu_items["i1"];
        assert!(item.is_required);
        assert_eq!(item.quantity, 2);
        assert_eq!(item.creator_name, "Dana");
    }

    #[test]
    fn test_add_menu_item_drops_splittable_flag() {
        let store = store_with_event("e1");
        let item = bread();
        assert!(item.is_splittable);

        store.add_menu_item("i1", item);

        let state = store.snapshot();
        assert!(!state.current_event.as_ref().unwrap().menu_items["i1"].is_splittable);
    }

    #[test]
    fn test_update_does_not_recompute_splittable() {
        let store = store_with_event("e1");
        store.add_menu_item("i1", bread());
        store.update_menu_item(
            "i1",
            MenuItemUpdate {
                is_splittable: Some(true),
                ..Default::default()
            },
        );

        store.update_menu_item(
            "i1",
            MenuItemUpdate {
                quantity: Some(1),
                ..Default::default()
            },
        );

        let state = store.snapshot();
        let item = &state.current_event.as_ref().unwrap().menu_items["i1"];
        assert_eq!(item.quantity, 1);
        assert!(item.is_splittable);
    }

    #[test]
    fn test_update_menu_item_leaves_other_items() {
        let store = store_with_event("e1");
        store.add_menu_item("a", bread());
        store.add_menu_item("b", MenuItem::new("Wine", Category::Drink, 1));

        store.update_menu_item(
            "a",
            MenuItemUpdate {
                name: Some("Challah".to_string()),
                ..Default::default()
            },
        );

        let state = store.snapshot();
        let event = state.current_event.as_ref().unwrap();
        assert_eq!(event.menu_items["a"].name, "Challah");
        assert!(event.menu_items["a"].is_required);
        assert_eq!(event.menu_items["b"].name, "Wine");
    }

    #[test]
    fn test_delete_menu_item_cascades() {
        let store = store_with_event("e1");
        store.add_menu_item("a", bread());
        store.add_menu_item("b", MenuItem::new("Wine", Category::Drink, 1));
        store.add_assignment("x", Assignment::new("a", "u1", "Dana", 1));
        store.add_assignment("y", Assignment::new("a", "u2", "Avi", 1));
        store.add_assignment("z", Assignment::new("b", "u2", "Avi", 1));

        store.delete_menu_item("a");

        let state = store.snapshot();
        let event = state.current_event.as_ref().unwrap();
        assert!(!event.menu_items.contains_key("a"));
        assert!(!event.assignments.contains_key("x"));
        assert!(!event.assignments.contains_key("y"));
        assert!(event.assignments.contains_key("z"));
        assert!(event.assignments.values().all(|a| a.menu_item_id != "a"));
    }

    #[test]
    fn test_add_then_delete_for_many_ids() {
        let store = store_with_event("e1");
        for n in 0..20 {
            let id = format!("item-{}", n);
            store.add_menu_item(id.clone(), bread());
            store.add_assignment(format!("as-{}", n), Assignment::new(id.clone(), "u1", "Dana", 1));
            store.delete_menu_item(&id);

            let state = store.snapshot();
            let event = state.current_event.as_ref().unwrap();
            assert!(!event.menu_items.contains_key(&id));
            assert!(event.assignments.values().all(|a| a.menu_item_id != id));
        }
    }

    #[test]
    fn test_assignment_lifecycle() {
        let store = store_with_event("e1");
        store.add_menu_item("a", bread());
        store.add_assignment("x", Assignment::new("a", "u1", "Dana", 1));

        store.update_assignment(
            "x",
            AssignmentUpdate {
                quantity: Some(2),
                status: Some(AssignmentStatus::Completed),
                ..Default::default()
            },
        );
        {
            let state = store.snapshot();
            let assignment = &state.current_event.as_ref().unwrap().assignments["x"];
            assert_eq!(assignment.quantity, 2);
            assert_eq!(assignment.status, AssignmentStatus::Completed);
            assert_eq!(assignment.user_name, "Dana");
        }

        store.delete_assignment("x");
        assert!(store.snapshot().current_event.as_ref().unwrap().assignments.is_empty());
    }

    #[test]
    fn test_participants() {
        let store = store_with_event("e1");
        store.add_participant("p1", Participant { name: "Dana".to_string(), joined_at: 7 });
        {
            let state = store.snapshot();
            assert_eq!(state.current_event.as_ref().unwrap().participants["p1"].joined_at, 7);
        }

        store.remove_participant("p1");
        assert!(store.snapshot().current_event.as_ref().unwrap().participants.is_empty());
    }

    #[test]
    fn test_toggle_delete_account_modal_pair() {
        let store = EventStore::new();
        let original = store.snapshot().show_delete_account_modal;

        store.toggle_delete_account_modal();
        assert_ne!(store.snapshot().show_delete_account_modal, original);

        store.toggle_delete_account_modal();
        assert_eq!(store.snapshot().show_delete_account_modal, original);
    }

    #[test]
    fn test_clear_then_partial_starts_fresh() {
        let store = store_with_event("e1");
        store.set_user(Some(User::new("u1", "Dana")));
        store.add_menu_item("a", bread());
        store.add_assignment("x", Assignment::new("a", "u1", "Dana", 1));

        store.clear_current_event();
        assert!(store.snapshot().current_event.is_none());
        assert!(store.snapshot().user.is_some(), "clearing the event keeps the user");

        let mut participants = Collection::new();
        participants.insert("p1".to_string(), Participant { name: "Dana".to_string(), joined_at: 1 });
        store.update_current_event_partial(EventPatch::default().with_id("e2").with_participants(participants.clone()));

        let state = store.snapshot();
        let event = state.current_event.as_ref().unwrap();
        assert_eq!(event.id, "e2");
        assert_eq!(event.participants, participants);
        assert!(event.menu_items.is_empty());
        assert!(event.assignments.is_empty());
    }

    #[test]
    fn test_observers_see_each_applied_mutation() {
        let store = EventStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _subscription = store.subscribe(move |state| {
            sink.lock().unwrap().push(state.current_event.as_ref().map(|e| e.id.clone()));
        });

        store.add_menu_item("a", bread());
        store.set_current_event(Some(Event::skeleton("e1")));
        store.clear_current_event();

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![Some("e1".to_string()), None]);
    }

    #[test]
    fn test_snapshots_are_immutable() {
        let store = store_with_event("e1");
        let before = store.snapshot();

        store.add_menu_item("a", bread());

        assert!(before.current_event.as_ref().unwrap().menu_items.is_empty());
        assert!(!Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_dropping_subscription_stops_notifications() {
        let store = EventStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let subscription = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.set_loading(true);
        drop(subscription);
        store.set_loading(false);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_detached_subscription_stays() {
        let store = EventStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        store
            .subscribe(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .detach();

        store.set_loading(true);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn test_observer_may_read_store() {
        let store = EventStore::new();
        let reader = store.clone();
        let loading = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&loading);
        let _subscription = store.subscribe(move |_| {
            *sink.lock().unwrap() = Some(reader.snapshot().is_loading);
        });

        store.set_loading(true);

        assert_eq!(*loading.lock().unwrap(), Some(true));
    }

    #[test]
    fn test_single_thread_notifications_follow_mutation_order() {
        let store = store_with_event("e1");
        let handle = store.clone();
        let counts = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&counts);
        let _subscription = store.subscribe(move |state| {
            sink.lock().unwrap().push(state.current_event.as_ref().map_or(0, |e| e.menu_items.len()));
        });

        for i in 0..5 {
            let target = if i % 2 == 0 { &store } else { &handle };
            target.add_menu_item(format!("item-{}", i), bread());
        }
        handle.delete_menu_item("item-0");

        assert_eq!(*counts.lock().unwrap(), vec![1, 2, 3, 4, 5, 4]);
    }
}
