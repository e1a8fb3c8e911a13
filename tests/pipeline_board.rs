mod common;

use common::{Backend, FakeDeal, FakeState, ScriptedInteraction};
use crm_client::{
    common::error::AppError,
    models::ids::RecordId,
    services::Outcome,
    views::board::BoardView,
};

fn seeded() -> FakeState {
    FakeState {
        deals: vec![
            FakeDeal::open(1, "Site institucional", 1500.0, "Prospecção"),
            FakeDeal::open(2, "ERP", 8000.0, "Proposta"),
            FakeDeal::open(3, "Suporte anual", 2400.0, "Negociação"),
        ],
        ..Default::default()
    }
}

#[tokio::test]
async fn valid_move_leaves_deal_only_in_target_stage() {
    let backend = Backend::start(seeded()).await;
    let state = backend.app_state();
    let ui = ScriptedInteraction::accepting();
    let service = &state.pipeline_service;

    let mut view = BoardView::new();
    service.refresh(&mut view, &ui).await.expect("board");
    let id = RecordId::Number(1);
    assert_eq!(view.board.as_ref().unwrap().stage_of(&id), Some("Prospecção"));

    let outcome = service.move_deal(&mut view, &id, "Proposta", &ui).await.expect("move");
    assert_eq!(outcome, Outcome::Applied);

    let board = view.board.as_ref().expect("refreshed board");
    assert_eq!(board.stages_with_deal(&id).count(), 1);
    assert_eq!(board.stage_of(&id), Some("Proposta"));
    assert!(view.pending.is_none());
    // move + recarga completa
    assert_eq!(backend.hits("POST /pipeline/move"), 1);
    assert_eq!(backend.hits("GET /pipeline/board"), 2);
    assert!(ui.alerts().is_empty());
}

#[tokio::test]
async fn rejected_move_is_an_invalid_transition_and_keeps_snapshot() {
    let backend = Backend::start(seeded()).await;
    let state = backend.app_state();
    let ui = ScriptedInteraction::accepting();
    let service = &state.pipeline_service;

    let mut view = BoardView::new();
    service.refresh(&mut view, &ui).await.expect("board");
    let before = view.board.clone();

    let err = service
        .move_deal(&mut view, &RecordId::Number(1), "Perdido", &ui)
        .await
        .expect_err("unknown stage must be rejected");

    assert!(matches!(err, AppError::InvalidTransition(ref m) if m == "Estágio inválido"));
    assert_eq!(view.board, before);
    assert_eq!(backend.hits("GET /pipeline/board"), 1);
    assert_eq!(ui.alerts().len(), 1);
    assert!(ui.alerts()[0].starts_with("Erro ao mover deal"));
}

#[tokio::test]
async fn drag_and_drop_resolves_to_one_move() {
    let backend = Backend::start(seeded()).await;
    let state = backend.app_state();
    let ui = ScriptedInteraction::accepting();
    let service = &state.pipeline_service;
    let mut view = BoardView::new();

    // soltar sem arrastar não faz nada
    let outcome = service.drop_on(&mut view, "Proposta", &ui).await.expect("noop drop");
    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(backend.total_hits(), 0);

    service.begin_drag(&mut view, RecordId::Number(3));
    let outcome = service.drop_on(&mut view, "Fechamento", &ui).await.expect("drop");
    assert_eq!(outcome, Outcome::Applied);
    assert!(view.dragged.is_none());
    assert_eq!(backend.hits("POST /pipeline/move"), 1);
    assert_eq!(view.board.unwrap().stage_of(&RecordId::Number(3)), Some("Fechamento"));
}

#[tokio::test]
async fn lose_without_reason_issues_no_request() {
    let backend = Backend::start(seeded()).await;
    let state = backend.app_state();
    let service = &state.pipeline_service;
    let mut view = BoardView::new();

    for answer in [None, Some("   ")] {
        let ui = ScriptedInteraction::answering(&[answer]);
        let outcome = service
            .lose_deal(&mut view, &RecordId::Number(2), &ui)
            .await
            .expect("cancelled");
        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(ui.questions(), vec!["Motivo da perda?"]);
    }

    assert_eq!(backend.total_hits(), 0);
}

#[tokio::test]
async fn lose_with_reason_sends_it_and_refreshes_board_and_metrics() {
    let backend = Backend::start(seeded()).await;
    let state = backend.app_state();
    let service = &state.pipeline_service;
    let mut view = BoardView::new();
    let ui = ScriptedInteraction::answering(&[Some("Preço acima do orçamento")]);

    let outcome = service
        .lose_deal(&mut view, &RecordId::Number(2), &ui)
        .await
        .expect("lose");

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(
        backend.with(|s| s.last_lose_reason.clone()).as_deref(),
        Some("Preço acima do orçamento")
    );
    assert_eq!(ui.alerts(), vec!["Deal marcado como perdido"]);
    let board = view.board.as_ref().expect("board");
    assert!(board.find_deal(&RecordId::Number(2)).is_none());
    assert_eq!(view.metrics.as_ref().expect("metrics").total_closed_deals, 1);
}

#[tokio::test]
async fn declined_win_issues_no_request() {
    let backend = Backend::start(seeded()).await;
    let state = backend.app_state();
    let ui = ScriptedInteraction::declining();
    let mut view = BoardView::new();

    let outcome = state
        .pipeline_service
        .win_deal(&mut view, &RecordId::Number(1), &ui)
        .await
        .expect("declined");

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(ui.questions(), vec!["Marcar este deal como ganho?"]);
    assert_eq!(backend.total_hits(), 0);
}

#[tokio::test]
async fn win_is_reflected_in_metrics_and_dashboard() {
    let backend = Backend::start(seeded()).await;
    let state = backend.app_state();
    let ui = ScriptedInteraction::accepting();
    let service = &state.pipeline_service;

    let metrics_before = service.fetch_metrics().await.expect("metrics");
    let mut dashboard = crm_client::views::DashboardView::default();
    state.dashboard_service.load(&mut dashboard).await.expect("dashboard");
    let open_before = match &dashboard {
        crm_client::views::DashboardView::Ready { stats, .. } => stats.deals.open,
        _ => panic!("dashboard should be ready"),
    };

    let mut view = BoardView::new();
    let outcome = service.win_deal(&mut view, &RecordId::Number(3), &ui).await.expect("win");
    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(ui.alerts(), vec!["Deal marcado como ganho!"]);

    let metrics_after = view.metrics.as_ref().expect("metrics refreshed after win");
    assert_eq!(metrics_after.total_won_deals, metrics_before.total_won_deals + 1);

    state.dashboard_service.load(&mut dashboard).await.expect("dashboard");
    match &dashboard {
        crm_client::views::DashboardView::Ready { stats, .. } => assert_eq!(stats.deals.open, open_before - 1),
        _ => panic!("dashboard should be ready"),
    }
}

#[tokio::test]
async fn missing_deal_alerts_and_keeps_previous_snapshot() {
    let backend = Backend::start(seeded()).await;
    let state = backend.app_state();
    let ui = ScriptedInteraction::accepting();
    let service = &state.pipeline_service;

    let mut view = BoardView::new();
    service.refresh(&mut view, &ui).await.expect("board");
    let before = view.board.clone();

    // deal inexistente: 404 no move, nenhum refresh
    let err = service
        .move_deal(&mut view, &RecordId::Number(99), "Proposta", &ui)
        .await
        .expect_err("missing deal");
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(view.board, before);
    assert_eq!(ui.alerts().len(), 1);
}
