mod common;

use stride_core::{
    display::TimelineView,
    models::CompletionMap,
    params::{AddComment, Id, SetStatus, TaskRef, ViewStats, ViewTasks},
    Category, ExportFormat, FilterOptions, PlannerBuilder, SortKey, TaskStatus,
};

#[tokio::test]
async fn test_imported_plan_views() {
    let (_temp_dir, planner) = common::create_test_planner().await;
    let plan = planner.import_plan(&common::website_plan()).await.unwrap();

    let timeline = planner.timeline(&Id { id: plan.id }).await.unwrap();
    let spans: Vec<(u32, u32, bool)> = timeline
        .entries
        .iter()
        .map(|e| (e.start_day, e.end_day, e.critical))
        .collect();
    assert_eq!(
        spans,
        vec![(0, 1, false), (1, 5, true), (5, 8, true), (8, 9, true)]
    );
    assert_eq!(timeline.total_days, 9);
    assert_eq!(timeline.total_weeks, 2);

    // The zero-estimate task takes one day on the timeline but none in stats
    let stats = planner
        .stats(
            &ViewStats {
                plan_id: plan.id,
                done: vec![],
            },
            &CompletionMap::new(),
        )
        .await
        .unwrap();
    assert_eq!(stats.total_days, 8);
    assert_eq!(stats.avg_days_per_task, 2);
    assert_eq!(stats.not_started, 4);
    assert_eq!(stats.independent, 1);

    let quick = planner
        .list_tasks(
            &ViewTasks {
                plan_id: plan.id,
                options: FilterOptions {
                    category: Category::Quick,
                    ..Default::default()
                },
                done: vec![],
            },
            &CompletionMap::new(),
        )
        .await
        .unwrap();
    let orders: Vec<u32> = quick.iter().map(|t| t.order).collect();
    assert_eq!(orders, vec![1]);

    let by_title = planner
        .list_tasks(
            &ViewTasks {
                plan_id: plan.id,
                options: FilterOptions {
                    search: "DE".to_string(),
                    sort: SortKey::Title,
                    ..Default::default()
                },
                done: vec![],
            },
            &CompletionMap::new(),
        )
        .await
        .unwrap();
    let titles: Vec<&str> = by_title.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Deploy", "Design the layout"]);

    let rendered = TimelineView::new(&timeline).to_string();
    assert!(rendered.contains("## Week 2 (days 8-9)"));
}

#[tokio::test]
async fn test_board_workflow_persists_across_planners() {
    let (temp_dir, planner) = common::create_test_planner().await;
    let plan = planner.import_plan(&common::website_plan()).await.unwrap();
    let first = TaskRef {
        plan_id: plan.id,
        order: 1,
    };

    for status in ["IN_PROGRESS", "IN_REVIEW", "DONE"] {
        planner
            .set_status(&SetStatus {
                task: first,
                status: status.to_string(),
            })
            .await
            .unwrap();
    }
    planner
        .add_comment(&AddComment {
            task: first,
            author: None,
            text: "Registered example.dev".to_string(),
        })
        .await
        .unwrap();

    let reopened = PlannerBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .build()
        .await
        .unwrap();
    let task = reopened.get_task(&first).await.unwrap();
    assert_eq!(task.status, TaskStatus::Done);
    assert_eq!(task.comments.len(), 1);
    assert_eq!(task.comments[0].author, "anonymous");

    let board = reopened.board(&Id { id: plan.id }).await.unwrap();
    assert_eq!(board.done_count(), 1);

    let summaries = reopened.list_plans().await.unwrap();
    assert_eq!(summaries[0].done_tasks, 1);

    // Board status and checklist completion are independent
    let stats = reopened
        .stats(
            &ViewStats {
                plan_id: plan.id,
                done: vec![],
            },
            &CompletionMap::new(),
        )
        .await
        .unwrap();
    assert_eq!(stats.completed, 0);
}

#[tokio::test]
async fn test_text_export_of_imported_plan() {
    let (_temp_dir, planner) = common::create_test_planner().await;
    let plan = planner.import_plan(&common::website_plan()).await.unwrap();

    let text = planner
        .export_plan(&Id { id: plan.id }, ExportFormat::Text)
        .await
        .unwrap();
    assert!(text.contains("Goal: Launch a personal website\n"));
    assert!(text.contains("Total Tasks: 4\n"));
    assert!(text.contains("4. Deploy\n   Publish to a static host\n   Dependencies: Task 2\n   Estimated Days: N/A\n"));

    let json = planner
        .export_plan(&Id { id: plan.id }, ExportFormat::Json)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["tasks"][1]["dependsOn"], 1);
    assert_eq!(value["tasks"][1]["status"], "TODO");
}

#[tokio::test]
async fn test_views_of_missing_plan() {
    let (_temp_dir, planner) = common::create_test_planner().await;

    assert!(planner.timeline(&Id { id: 7 }).await.is_err());
    assert!(planner.board(&Id { id: 7 }).await.is_err());
}
