mod common;

use std::sync::Arc;

use common::{movie, movie_page, settle, wait_until, FnUseCase, GatedUseCase};
use futures::StreamExt;
use moviedeck::collector::FetchError;
use moviedeck::domain::{MovieDetailBundle, MovieDetailEntity, MovieDetailParams};
use moviedeck::screen::detail::{DetailAction, DetailEvent, DetailHandler, DetailViewModel};
use moviedeck::screen::LoadState;

fn bundle(id: i32, title: &str) -> MovieDetailBundle {
    MovieDetailBundle {
        detail: MovieDetailEntity {
            id: Some(id),
            title: Some(title.to_string()),
            runtime: Some(120),
            ..Default::default()
        },
        recommendations: movie_page(1, vec![movie(100, "Rec A"), movie(101, "Rec B")]),
    }
}

#[tokio::test]
async fn loads_target_movie_and_recommendations() {
    let use_case = Arc::new(FnUseCase::new(|params: MovieDetailParams| {
        vec![Ok(bundle(params.movie_id, "Dune"))]
    }));
    let vm = DetailViewModel::detail(DetailHandler::new(use_case));

    vm.dispatch(DetailAction::FetchMovieDetail { movie_id: 42 });
    let state = wait_until(&vm, |s| s.target_movie.id == Some(42)).await;

    assert_eq!(state.target_movie.title.as_deref(), Some("Dune"));
    assert_eq!(state.target_movie.runtime, Some(120));
    assert_eq!(state.recommendations.len(), 2);
    assert_eq!(state.recommendations.page(), 2);
    assert_eq!(state.load_state, LoadState::Idle);
}

#[tokio::test]
async fn shows_loading_while_request_is_pending() {
    let use_case = Arc::new(GatedUseCase::<MovieDetailParams, MovieDetailBundle>::new());
    let vm = DetailViewModel::detail(DetailHandler::new(use_case.clone()));

    vm.fetch_movie_detail(7);
    use_case.wait_for_calls(1).await;
    assert_eq!(use_case.params(0), MovieDetailParams { movie_id: 7 });
    wait_until(&vm, |s| s.load_state == LoadState::Loading).await;

    use_case.respond(0, Ok(bundle(7, "Heat")));
    let state = wait_until(&vm, |s| s.load_state == LoadState::Idle).await;
    assert_eq!(state.target_movie.id, Some(7));
}

#[tokio::test]
async fn failure_keeps_previous_movie_and_emits_event() {
    let use_case = Arc::new(GatedUseCase::<MovieDetailParams, MovieDetailBundle>::new());
    let vm = DetailViewModel::detail(DetailHandler::new(use_case.clone()));
    let mut events = vm.observe_events();

    vm.fetch_movie_detail(1);
    use_case.wait_for_calls(1).await;
    use_case.respond(0, Ok(bundle(1, "Alien")));
    let before = wait_until(&vm, |s| s.target_movie.id == Some(1)).await;

    vm.fetch_movie_detail(2);
    use_case.wait_for_calls(2).await;
    use_case.respond(1, Err(FetchError::data_fetch("movie 2 not found")));
    let after = wait_until(&vm, |s| s.load_state == LoadState::Failed).await;

    assert_eq!(after.target_movie, before.target_movie);
    assert_eq!(after.recommendations, before.recommendations);

    let event = tokio::time::timeout(common::WAIT, events.next())
        .await
        .unwrap();
    assert_eq!(
        event,
        Some(DetailEvent::FetchMovieDetailFailed {
            movie_id: 2,
            message: "movie 2 not found".to_string(),
        })
    );
}

#[tokio::test]
async fn nothing_lands_after_cancel() {
    let use_case = Arc::new(GatedUseCase::<MovieDetailParams, MovieDetailBundle>::new());
    let vm = DetailViewModel::detail(DetailHandler::new(use_case.clone()));

    vm.fetch_movie_detail(3);
    use_case.wait_for_calls(1).await;
    wait_until(&vm, |s| s.load_state == LoadState::Loading).await;
    let at_cancel = vm.state();

    vm.cancel();
    use_case.respond(0, Ok(bundle(3, "Up")));
    settle().await;

    assert!(vm.is_cancelled());
    assert_eq!(vm.state(), at_cancel);
    assert_eq!(vm.state().target_movie.id, None);
}

#[tokio::test]
async fn switching_movies_shows_only_the_new_recommendations() {
    let use_case = Arc::new(FnUseCase::new(|params: MovieDetailParams| {
        let id = params.movie_id;
        vec![Ok(MovieDetailBundle {
            detail: MovieDetailEntity {
                id: Some(id),
                ..Default::default()
            },
            recommendations: movie_page(1, vec![movie(id * 100, "Rec")]),
        })]
    }));
    let vm = DetailViewModel::detail(DetailHandler::new(use_case));

    vm.fetch_movie_detail(1);
    wait_until(&vm, |s| s.target_movie.id == Some(1)).await;
    vm.fetch_movie_detail(2);
    let state = wait_until(&vm, |s| s.target_movie.id == Some(2)).await;

    let recommended: Vec<_> = state.recommendations.items().iter().map(|m| m.id).collect();
    assert_eq!(recommended, vec![Some(200)]);
}

#[tokio::test]
async fn fetch_without_result_returns_to_idle() {
    let use_case = Arc::new(GatedUseCase::<MovieDetailParams, MovieDetailBundle>::new());
    let vm = DetailViewModel::detail(DetailHandler::new(use_case.clone()));

    vm.fetch_movie_detail(5);
    use_case.wait_for_calls(1).await;
    wait_until(&vm, |s| s.load_state == LoadState::Loading).await;

    // Dropping the responder ends the stream with no emission at all.
    use_case.abandon(0);
    let state = wait_until(&vm, |s| s.load_state == LoadState::Idle).await;
    assert_eq!(state.target_movie.id, None);
}
