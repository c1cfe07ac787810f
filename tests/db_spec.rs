use chrono::{Duration, NaiveDate, Utc};
use speculate2::speculate;
use studyplan::db::Database;
use studyplan::models::*;
use uuid::Uuid;

fn sample_plan() -> Plan {
    let now = Utc::now();
    let start = NaiveDate::from_ymd_opt(2030, 4, 28).expect("valid date");
    Plan {
        id: Uuid::new_v4(),
        title: "Study Plan for May 1, 2030".to_string(),
        exam_date: NaiveDate::from_ymd_opt(2030, 5, 1).expect("valid date"),
        total_hours_per_day: 4.0,
        subjects: vec![Subject {
            id: "subject_0".to_string(),
            name: "Mathematics".to_string(),
            priority: Priority::High,
            estimated_hours: 12.0,
            completed: false,
        }],
        schedule: (0..3)
            .map(|day| ScheduleItem {
                id: Uuid::new_v4(),
                date: start + Duration::days(day),
                subject: "Mathematics".to_string(),
                topic: "Algebra".to_string(),
                duration: 3.0,
                completed: false,
                notes: None,
            })
            .collect(),
        created_at: now,
        updated_at: now,
    }
}

fn sample_chat(title: &str) -> StoredChat {
    let now = Utc::now();
    StoredChat {
        id: Uuid::new_v4(),
        title: title.to_string(),
        messages: vec![ChatMessage {
            id: Uuid::new_v4(),
            role: MessageRole::User,
            content: "Explain Kirchhoff's laws".to_string(),
            timestamp: now,
        }],
        last_message: "Explain Kirchhoff's laws".to_string(),
        created_at: now,
        updated_at: now,
        pinned: None,
    }
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
    }

    describe "plans" {
        describe "save_plan" {
            it "round-trips a plan unchanged" {
                let plan = sample_plan();
                db.save_plan(&plan).expect("Failed to save plan");

                let found = db.get_plan(plan.id).expect("Plan not found");
                assert_eq!(found, plan);
            }

            it "is idempotent for identical saves" {
                let plan = sample_plan();
                db.save_plan(&plan).expect("Failed to save plan");
                db.save_plan(&plan).expect("Failed to save plan");

                let plans = db.get_all_plans();
                assert_eq!(plans.len(), 1);
                assert_eq!(plans[0], plan);
            }

            it "replaces the stored record on resave" {
                let mut plan = sample_plan();
                db.save_plan(&plan).expect("Failed to save plan");

                plan.title = "Renamed".to_string();
                db.save_plan(&plan).expect("Failed to save plan");

                let plans = db.get_all_plans();
                assert_eq!(plans.len(), 1);
                assert_eq!(plans[0].title, "Renamed");
            }
        }

        describe "get_plan" {
            it "returns None for an unknown id" {
                assert!(db.get_plan(Uuid::new_v4()).is_none());
            }
        }

        describe "get_all_plans" {
            it "returns empty when nothing was stored" {
                assert!(db.get_all_plans().is_empty());
            }

            it "keeps insertion order" {
                let first = sample_plan();
                let second = sample_plan();
                db.save_plan(&first).expect("Failed to save plan");
                db.save_plan(&second).expect("Failed to save plan");

                let plans = db.get_all_plans();
                assert_eq!(plans[0].id, first.id);
                assert_eq!(plans[1].id, second.id);
            }
        }

        describe "delete_plan" {
            it "removes the plan" {
                let plan = sample_plan();
                db.save_plan(&plan).expect("Failed to save plan");

                assert!(db.delete_plan(plan.id).expect("Failed to delete"));
                assert!(db.get_plan(plan.id).is_none());
            }

            it "is a no-op for an absent id" {
                let plan = sample_plan();
                db.save_plan(&plan).expect("Failed to save plan");

                assert!(!db.delete_plan(Uuid::new_v4()).expect("Failed to delete"));
                assert_eq!(db.get_all_plans().len(), 1);
            }
        }

        describe "update_schedule_item" {
            it "merges the partial update and refreshes updated_at" {
                let plan = sample_plan();
                db.save_plan(&plan).expect("Failed to save plan");

                let item_id = plan.schedule[1].id;
                db.update_schedule_item(plan.id, item_id, UpdateScheduleItemInput {
                    completed: Some(true),
                    notes: Some("halfway through".to_string()),
                });

                let stored = db.get_plan(plan.id).expect("Plan not found");
                let item = stored.schedule.iter().find(|i| i.id == item_id).expect("item");
                assert!(item.completed);
                assert_eq!(item.notes.as_deref(), Some("halfway through"));
                assert!(stored.updated_at > plan.updated_at);

                // Untouched fields and items stay as they were.
                assert_eq!(item.duration, 3.0);
                assert!(!stored.schedule[0].completed);
            }

            it "leaves the store unchanged for an unknown item" {
                let plan = sample_plan();
                db.save_plan(&plan).expect("Failed to save plan");

                db.update_schedule_item(plan.id, Uuid::new_v4(), UpdateScheduleItemInput {
                    completed: Some(true),
                    ..Default::default()
                });

                let stored = db.get_plan(plan.id).expect("Plan not found");
                assert_eq!(stored, plan);
            }

            it "leaves the store unchanged for an unknown plan" {
                let plan = sample_plan();
                db.save_plan(&plan).expect("Failed to save plan");

                db.update_schedule_item(Uuid::new_v4(), plan.schedule[0].id, UpdateScheduleItemInput {
                    completed: Some(true),
                    ..Default::default()
                });

                assert_eq!(db.get_plan(plan.id).expect("Plan not found"), plan);
            }
        }
    }

    describe "chats" {
        describe "save_chat" {
            it "round-trips a chat unchanged" {
                let chat = sample_chat("Circuits revision");
                db.save_chat(&chat).expect("Failed to save chat");

                assert_eq!(db.load_chat(chat.id).expect("Chat not found"), chat);
            }

            it "preserves the pin state when a resave leaves it unset" {
                let chat = sample_chat("Circuits revision");
                db.save_chat(&chat).expect("Failed to save chat");
                db.update_chat_pinned(chat.id, true);

                // The UI resaves the whole record without knowing about pins.
                db.save_chat(&chat).expect("Failed to save chat");

                let stored = db.load_chat(chat.id).expect("Chat not found");
                assert_eq!(stored.pinned, Some(true));
            }

            it "keeps only the 50 most recently updated chats" {
                let mut oldest_id = None;
                for i in 0..55 {
                    let mut chat = sample_chat(&format!("Chat {i}"));
                    chat.updated_at = Utc::now() + Duration::seconds(i);
                    if i == 0 {
                        oldest_id = Some(chat.id);
                    }
                    db.save_chat(&chat).expect("Failed to save chat");
                }

                let chats = db.get_all_chats();
                assert_eq!(chats.len(), 50);
                assert!(!chats.iter().any(|c| Some(c.id) == oldest_id));
            }
        }

        describe "get_all_chats" {
            it "sorts by updated_at descending" {
                let mut older = sample_chat("Older");
                older.updated_at = Utc::now() - Duration::hours(2);
                let newer = sample_chat("Newer");
                db.save_chat(&older).expect("Failed to save chat");
                db.save_chat(&newer).expect("Failed to save chat");

                let chats = db.get_all_chats();
                assert_eq!(chats[0].title, "Newer");
                assert_eq!(chats[1].title, "Older");
            }
        }

        describe "delete_chat" {
            it "removes the chat and reports absence" {
                let chat = sample_chat("Throwaway");
                db.save_chat(&chat).expect("Failed to save chat");

                assert!(db.delete_chat(chat.id).expect("Failed to delete"));
                assert!(!db.delete_chat(chat.id).expect("Failed to delete"));
                assert!(db.load_chat(chat.id).is_none());
            }
        }

        describe "update_chat_title" {
            it "renames and bumps updated_at" {
                let chat = sample_chat("Draft");
                db.save_chat(&chat).expect("Failed to save chat");

                db.update_chat_title(chat.id, "Thermodynamics Q&A");

                let stored = db.load_chat(chat.id).expect("Chat not found");
                assert_eq!(stored.title, "Thermodynamics Q&A");
                assert!(stored.updated_at > chat.updated_at);
            }

            it "ignores unknown chats" {
                db.update_chat_title(Uuid::new_v4(), "Nobody home");
                assert!(db.get_all_chats().is_empty());
            }
        }
    }

    describe "on-disk store" {
        it "persists across reopen" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let path = dir.path().join("studyplan.db");
            let plan = sample_plan();

            {
                let db = Database::open(path.clone()).expect("Failed to open database");
                db.migrate().expect("Failed to run migrations");
                db.save_plan(&plan).expect("Failed to save plan");
            }

            let reopened = Database::open(path).expect("Failed to reopen database");
            reopened.migrate().expect("Failed to run migrations");
            assert_eq!(reopened.get_plan(plan.id).expect("Plan not found"), plan);
        }
    }
}
