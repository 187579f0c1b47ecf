use crate::dashboard::{
    aggregate, clamp_window_end, clamp_window_len, heatmap_weeks, stats_row, trailing_window,
    DEFAULT_GRID_DAYS, STATS_WINDOW_DAYS,
};
use crate::errors::AppError;
use crate::models::{
    CreateHabitRequest, DashboardParams, DashboardResponse, Habit, HabitListResponse,
    HeatmapResponse, ListParams, ToggleRequest, ToggleResponse, UpdateHabitRequest,
};
use crate::state::AppState;
use crate::storage::persist_store;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Local, NaiveDate};

pub async fn list_habits(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<HabitListResponse>, AppError> {
    let today = today();
    let to = params.to.unwrap_or(today);
    let from = params
        .from
        .unwrap_or(today - Duration::days(STATS_WINDOW_DAYS as i64));

    let data = state.data.lock().await;
    Ok(Json(HabitListResponse {
        habits: data.sorted_habits(),
        entries: data.entries_between(from, to),
    }))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<Habit>), AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("habit name must not be blank"));
    }
    let group = payload.group.as_deref().and_then(normalize_group);

    let mut data = state.data.lock().await;
    let habit = data.create_habit(name.to_string(), group);
    persist_store(&state.data_path, &data).await?;

    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn update_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateHabitRequest>,
) -> Result<StatusCode, AppError> {
    if let Some(name) = &payload.name {
        if name.trim().is_empty() {
            return Err(AppError::bad_request("habit name must not be blank"));
        }
    }

    let mut data = state.data.lock().await;
    let habit = data
        .habit_mut(&id)
        .ok_or_else(|| AppError::not_found("unknown habit"))?;
    if let Some(name) = payload.name {
        habit.name = name.trim().to_string();
    }
    if let Some(group) = payload.group {
        // An empty string clears the group so the habit leaves its section.
        habit.group = normalize_group(&group);
    }
    if let Some(color) = payload.color {
        habit.color = color;
    }
    if let Some(order) = payload.order {
        habit.order = order;
    }

    persist_store(&state.data_path, &data).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    if !data.remove_habit(&id) {
        return Err(AppError::not_found("unknown habit"));
    }

    persist_store(&state.data_path, &data).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_entry(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let mut data = state.data.lock().await;
    if data.habit(&payload.habit_id).is_none() {
        return Err(AppError::not_found("unknown habit"));
    }
    let value = data.toggle_entry(&payload.habit_id, payload.date);

    persist_store(&state.data_path, &data).await?;
    Ok(Json(ToggleResponse {
        habit_id: payload.habit_id,
        date: payload.date,
        value,
    }))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardResponse>, AppError> {
    let today = today();
    let end = clamp_window_end(params.end.unwrap_or(today), today);
    let len = clamp_window_len(params.days.unwrap_or(DEFAULT_GRID_DAYS));
    let days = trailing_window(end, len);

    let mut data = state.data.lock().await;
    let mut habits = data.sorted_habits();
    if let Some(group) = &params.group {
        habits.retain(|habit| habit.group.as_deref() == Some(group.as_str()));
    }
    let index = data.index();

    Ok(Json(aggregate(&days, &habits, &index, today)))
}

pub async fn get_habit_heatmap(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HeatmapResponse>, AppError> {
    let mut data = state.data.lock().await;
    let habit = data
        .habit(&id)
        .cloned()
        .ok_or_else(|| AppError::not_found("unknown habit"))?;
    let index = data.index();

    let today = today();
    let history = trailing_window(today, STATS_WINDOW_DAYS);
    Ok(Json(HeatmapResponse {
        weeks: heatmap_weeks(&habit, &index, today),
        stats: stats_row(&index, &habit, &history, today),
        habit,
    }))
}

fn normalize_group(group: &str) -> Option<String> {
    let trimmed = group.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
