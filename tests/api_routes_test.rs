use async_trait::async_trait;
use cube_solver::{
    ApiRequest, CubeError, FaceletString, MemoryStore, Method, Result, Router, SolveOutcome,
    SolveService, Solver,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";
const AFTER_U: &str = "UUUUUUUUUBBBRRRRRRRRRFFFFFFDDDDDDDDDFFFLLLLLLLLLBBBBBB";

/// Replies with a fixed outcome and remembers what it was asked.
struct StubSolver {
    reply: std::result::Result<SolveOutcome, String>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl StubSolver {
    fn new(reply: std::result::Result<SolveOutcome, String>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn solving(solution: &str) -> Arc<Self> {
        Self::new(Ok(SolveOutcome::Solved(solution.to_string())))
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Solver for StubSolver {
    async fn solve(&self, facelets: &FaceletString) -> Result<SolveOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(facelets.to_string());
        self.reply
            .clone()
            .map_err(|message| CubeError::SolverError { message })
    }
}

fn router(solver: Arc<StubSolver>) -> Router<Arc<StubSolver>, MemoryStore> {
    Router::new(SolveService::new(solver, MemoryStore::new()))
}

fn solved_cube() -> Value {
    json!([
        [[0,0,0],[0,0,0],[0,0,0]],
        [[1,1,1],[1,1,1],[1,1,1]],
        [[2,2,2],[2,2,2],[2,2,2]],
        [[3,3,3],[3,3,3],[3,3,3]],
        [[4,4,4],[4,4,4],[4,4,4]],
        [[5,5,5],[5,5,5],[5,5,5]],
    ])
}

// Solved cube after a clockwise U turn.
fn turned_cube() -> Value {
    json!([
        [[0,0,0],[0,0,0],[0,0,0]],
        [[5,5,5],[1,1,1],[1,1,1]],
        [[1,1,1],[2,2,2],[2,2,2]],
        [[3,3,3],[3,3,3],[3,3,3]],
        [[2,2,2],[4,4,4],[4,4,4]],
        [[4,4,4],[5,5,5],[5,5,5]],
    ])
}

fn post(path: &str, body: Value) -> ApiRequest {
    ApiRequest::post(path, body.to_string())
}

#[tokio::test]
async fn test_solve_already_solved_cube() {
    let solver = StubSolver::solving("R U");
    let router = router(Arc::clone(&solver));

    let response = router
        .dispatch(&post("/solve", json!({ "cube": solved_cube() })))
        .await;

    assert_eq!(response.status, 200);
    assert_eq!(
        response.body,
        json!({
            "solution": [],
            "move_count": 0,
            "status": "success",
            "message": "Cube is already solved",
            "facelet_string": SOLVED,
        })
    );
    assert!(response.body.get("solve_time_ms").is_none());
    assert_eq!(solver.calls(), 0);

    let history = router.dispatch(&ApiRequest::get("/history")).await;
    assert_eq!(history.body["total_count"], 1);
    assert_eq!(history.body["solves"][0]["move_count"], 0);
    assert_eq!(history.body["solves"][0]["solution"], json!([]));
}

#[tokio::test]
async fn test_solve_scrambled_cube() {
    let solver = StubSolver::solving("U'");
    let router = router(Arc::clone(&solver));

    let response = router
        .dispatch(&post("/solve/", json!({ "cube": turned_cube() })))
        .await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body["solution"], json!(["U'"]));
    assert_eq!(response.body["move_count"], 1);
    assert_eq!(response.body["status"], "success");
    assert_eq!(response.body["facelet_string"], AFTER_U);
    assert!(response.body["solve_time_ms"].as_f64().unwrap() >= 0.0);
    assert!(response.body.get("message").is_none());

    assert_eq!(solver.calls(), 1);
    assert_eq!(solver.seen.lock().unwrap().as_slice(), [AFTER_U.to_string()]);
}

#[tokio::test]
async fn test_solve_rejects_malformed_json() {
    let solver = StubSolver::solving("U'");
    let router = router(Arc::clone(&solver));

    let response = router.dispatch(&ApiRequest::post("/solve", "{cube:")).await;

    assert_eq!(response.status, 400);
    assert_eq!(
        response.body,
        json!({ "error": "Invalid JSON in request body", "status": "error" })
    );
    assert_eq!(solver.calls(), 0);
}

#[tokio::test]
async fn test_schema_errors_precede_cube_validation() {
    let router = router(StubSolver::solving("U'"));

    // Missing row and an out-of-range color: the schema error wins.
    let mut cube = solved_cube();
    cube[0][0][0] = json!(9);
    cube[5].as_array_mut().unwrap().pop();

    let response = router.dispatch(&post("/solve", json!({ "cube": cube }))).await;
    assert_eq!(response.status, 400);
    assert_eq!(
        response.body["error"],
        "Invalid request body: cube[5]: expected 3 rows, found 2"
    );

    let response = router.dispatch(&post("/solve", json!({ "faces": [] }))).await;
    assert_eq!(response.status, 400);
    assert_eq!(response.body["error"], "Invalid request body: cube: field required");
}

#[tokio::test]
async fn test_solve_rejects_implausible_cubes() {
    let solver = StubSolver::solving("U'");
    let router = router(Arc::clone(&solver));

    let mut cube = solved_cube();
    cube[5][2][2] = json!(4);
    let response = router.dispatch(&post("/solve", json!({ "cube": cube }))).await;
    assert_eq!(response.status, 400);
    assert_eq!(
        response.body["error"],
        "Invalid cube state: Color 4 appears 10 times, should be 9."
    );

    let mut cube = solved_cube();
    cube[1][0][0] = json!(6);
    let response = router.dispatch(&post("/solve", json!({ "cube": cube }))).await;
    assert_eq!(
        response.body["error"],
        "Invalid cube state: Invalid color value: 6. Must be 0-5."
    );

    assert_eq!(solver.calls(), 0);
}

#[tokio::test]
async fn test_unsolvable_cube() {
    let router = router(StubSolver::new(Ok(SolveOutcome::Unsolvable)));

    let response = router
        .dispatch(&post("/solve", json!({ "cube": turned_cube() })))
        .await;

    assert_eq!(response.status, 400);
    assert_eq!(
        response.body,
        json!({ "error": "Cube state is unsolvable", "status": "error" })
    );
}

#[tokio::test]
async fn test_solver_rejected_string_includes_diagnostics() {
    let router = router(StubSolver::new(Ok(SolveOutcome::InvalidInput(
        "Error 5: some corner is twisted".to_string(),
    ))));

    let response = router
        .dispatch(&post("/solve", json!({ "cube": turned_cube() })))
        .await;

    assert_eq!(response.status, 400);
    assert_eq!(
        response.body,
        json!({
            "error": "Invalid cube configuration - this cube state is not physically solvable",
            "details": "Error 5: some corner is twisted",
            "facelet_string": AFTER_U,
            "status": "error",
        })
    );

    let history = router.dispatch(&ApiRequest::get("/history")).await;
    assert_eq!(history.body["total_count"], 0);
}

#[tokio::test]
async fn test_solver_crash_is_a_server_error() {
    let router = router(StubSolver::new(Err("solver table missing".to_string())));

    let response = router
        .dispatch(&post("/solve", json!({ "cube": turned_cube() })))
        .await;

    assert_eq!(response.status, 500);
    assert_eq!(
        response.body,
        json!({ "error": "Solver error: solver table missing", "status": "error" })
    );
}

#[tokio::test]
async fn test_validate_endpoint() {
    let solver = StubSolver::solving("U'");
    let router = router(Arc::clone(&solver));

    let response = router
        .dispatch(&post("/validate", json!({ "cube": turned_cube() })))
        .await;
    assert_eq!(response.status, 200);
    assert_eq!(
        response.body,
        json!({ "valid": true, "message": "Valid", "facelet_string": AFTER_U, "status": "success" })
    );

    let mut cube = solved_cube();
    cube[2][1][1] = json!(1);
    cube[1][0][1] = json!(2);
    let response = router.dispatch(&post("/validate", json!({ "cube": cube }))).await;
    assert_eq!(response.status, 400);
    assert_eq!(response.body["valid"], false);
    assert_eq!(response.body["status"], "error");
    assert_eq!(
        response.body["message"],
        "Center squares must be unique colors. Found centers: [0, 1, 1, 3, 4, 5]."
    );

    let response = router.dispatch(&ApiRequest::post("/validate", "not json")).await;
    assert_eq!(response.status, 400);
    assert_eq!(response.body["error"], "Invalid JSON in request body");

    assert_eq!(solver.calls(), 0);
    let history = router.dispatch(&ApiRequest::get("/history")).await;
    assert_eq!(history.body["total_count"], 0);
}

#[tokio::test]
async fn test_health_and_unknown_routes() {
    let router = router(StubSolver::solving("U'"));

    let response = router.dispatch(&ApiRequest::get("/health/")).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body["status"], "healthy");

    let response = router.dispatch(&ApiRequest::get("/solve")).await;
    assert_eq!(response.status, 405);
    assert_eq!(response.body["error"], "Method not allowed");

    let response = router
        .dispatch(&ApiRequest::new(Method::Delete, "/history"))
        .await;
    assert_eq!(response.status, 405);

    let response = router.dispatch(&ApiRequest::get("/admin")).await;
    assert_eq!(response.status, 404);
    assert_eq!(response.body, json!({ "error": "Not found", "status": "error" }));
}

#[tokio::test]
async fn test_history_pagination_and_attribution() {
    let router = router(StubSolver::solving("U'"));

    let first = post("/solve", json!({ "cube": turned_cube() }))
        .with_header("X-Forwarded-For", "203.0.113.9, 10.0.0.1")
        .with_remote_addr("10.0.0.1");
    let second = post("/solve", json!({ "cube": solved_cube() })).with_remote_addr("192.168.0.5");
    let third = post("/solve", json!({ "cube": turned_cube() }));

    for request in [&first, &second, &third] {
        assert_eq!(router.dispatch(request).await.status, 200);
    }

    let response = router
        .dispatch(&ApiRequest::get("/history").with_query("limit", "1000"))
        .await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body["limit"], 100);
    assert_eq!(response.body["offset"], 0);
    assert_eq!(response.body["total_count"], 3);
    assert_eq!(response.body["status"], "success");

    let solves = response.body["solves"].as_array().unwrap();
    assert_eq!(solves.len(), 3);
    let addresses: Vec<&str> = solves
        .iter()
        .map(|s| s["ip_address"].as_str().unwrap())
        .collect();
    assert_eq!(addresses, vec!["unknown", "192.168.0.5", "203.0.113.9"]);
    assert_eq!(solves[2]["solution"], json!(["U'"]));
    assert_eq!(solves[2]["facelet_string"], AFTER_U);
    assert!(solves[2]["timestamp"].as_str().unwrap().contains('T'));

    let response = router
        .dispatch(
            &ApiRequest::get("/history")
                .with_query("limit", "1")
                .with_query("offset", "1"),
        )
        .await;
    let solves = response.body["solves"].as_array().unwrap();
    assert_eq!(solves.len(), 1);
    assert_eq!(solves[0]["ip_address"], "192.168.0.5");
    assert_eq!(response.body["total_count"], 3);

    let response = router
        .dispatch(&ApiRequest::get("/history").with_query("limit", "lots"))
        .await;
    assert_eq!(response.status, 400);
    assert_eq!(response.body["error"], "Invalid limit or offset parameter");
}

#[tokio::test]
async fn test_guarded_dispatch_matches_plain_dispatch() {
    let router = Arc::new(router(StubSolver::solving("U'")));

    let response = router
        .dispatch_guarded(post("/solve", json!({ "cube": turned_cube() })))
        .await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body["move_count"], 1);
}

struct PanickingSolver;

#[async_trait]
impl Solver for PanickingSolver {
    async fn solve(&self, _facelets: &FaceletString) -> Result<SolveOutcome> {
        panic!("solver blew up");
    }
}

#[tokio::test]
async fn test_guarded_dispatch_turns_a_panic_into_a_server_error() {
    let store = Arc::new(MemoryStore::new());
    let router = Arc::new(Router::new(SolveService::new(
        PanickingSolver,
        Arc::clone(&store),
    )));

    let response = router
        .dispatch_guarded(post("/solve", json!({ "cube": turned_cube() })))
        .await;

    assert_eq!(response.status, 500);
    assert_eq!(
        response.body,
        json!({ "error": "Server error: internal error", "status": "error" })
    );

    // The router is still usable afterwards.
    let health = router.dispatch_guarded(ApiRequest::get("/health")).await;
    assert_eq!(health.status, 200);
    let history = router.dispatch_guarded(ApiRequest::get("/history")).await;
    assert_eq!(history.body["total_count"], 0);
}
