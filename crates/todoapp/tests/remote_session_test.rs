use tokio::net::TcpListener;
use tokio::sync::oneshot;
use todoapp::client::render::{DisplayRow, Filter};
use todoapp::client::state::{Dispatch, Intent};
use todoapp::client::{RemoteClient, RemoteSession};
use todoapp::store::collection::CollectionStore;
use todoapp::store::mem_collection::MemCollection;
use todoapp::store::TodoStore;

struct TestServer {
    api_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start(store: Box<dyn TodoStore>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            todoapp::server::serve_listener(listener, store, async move {
                let _ = rx.await;
            })
            .await
            .unwrap();
        });
        Self {
            api_url: format!("http://{}/api", addr),
            shutdown: Some(tx),
            handle,
        }
    }

    async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap();
    }
}

fn texts(session: &RemoteSession) -> Vec<String> {
    session
        .state()
        .rows()
        .into_iter()
        .filter_map(|row| match row {
            DisplayRow::Task { text, .. } => Some(text),
            DisplayRow::Placeholder(_) => None,
        })
        .collect()
}

#[tokio::test]
async fn test_buy_milk_walk_dog_over_http() {
    let server = TestServer::start(Box::new(CollectionStore::new(MemCollection::new()))).await;
    let mut session = RemoteSession::new(RemoteClient::new(&server.api_url).unwrap());

    assert_eq!(session.load().await, Dispatch::Applied);
    assert!(session.state().tasks.is_empty());
    assert_eq!(
        session.state().rows(),
        vec![DisplayRow::Placeholder("No tasks yet! Add one above.".into())]
    );

    assert_eq!(session.dispatch(Intent::Add("Buy milk".into())).await, Dispatch::Applied);
    assert!(!session.state().adding);
    let milk_id = session.state().tasks[0].id.clone();

    session.dispatch(Intent::Toggle(milk_id.clone())).await;
    assert!(session.state().find(&milk_id).unwrap().completed);

    session.dispatch(Intent::Add("Walk dog".into())).await;
    assert_eq!(session.state().tasks.len(), 2);
    assert_eq!(session.state().remaining(), "1 task remaining");

    session.dispatch(Intent::SetFilter(Filter::Active)).await;
    assert_eq!(texts(&session), vec!["Walk dog"]);
    session.dispatch(Intent::SetFilter(Filter::Completed)).await;
    assert_eq!(texts(&session), vec!["Buy milk"]);

    assert_eq!(session.dispatch(Intent::ClearCompleted).await, Dispatch::Applied);
    assert_eq!(session.state().tasks.len(), 1);
    assert_eq!(session.state().tasks[0].text, "Walk dog");

    // a fresh session sees the same server state
    let mut other = RemoteSession::new(RemoteClient::new(&server.api_url).unwrap());
    other.load().await;
    assert_eq!(other.state().tasks, session.state().tasks);

    server.stop().await;
}

#[tokio::test]
async fn test_rejected_request_leaves_state_and_raises_notice() {
    let server = TestServer::start(Box::new(CollectionStore::new(MemCollection::new()))).await;
    let mut session = RemoteSession::new(RemoteClient::new(&server.api_url).unwrap());
    session.load().await;
    session.dispatch(Intent::Add("Buy milk".into())).await;
    let id = session.state().tasks[0].id.clone();

    // Removed behind the session's back: its delete now gets a 404.
    let mut other = RemoteSession::new(RemoteClient::new(&server.api_url).unwrap());
    other.load().await;
    assert_eq!(other.dispatch(Intent::Delete(id.clone())).await, Dispatch::Applied);

    assert_eq!(session.dispatch(Intent::Delete(id.clone())).await, Dispatch::Failed);
    assert!(session.state().find(&id).is_some());
    assert_eq!(session.state().notices.len(), 1);
    assert_eq!(session.state().notices[0].message, "Failed to delete task");

    server.stop().await;
}

#[tokio::test]
async fn test_failed_add_clears_busy_flag() {
    let store = std::sync::Arc::new(CollectionStore::new(MemCollection::new()));
    let server = TestServer::start(Box::new(std::sync::Arc::clone(&store))).await;
    let mut session = RemoteSession::new(RemoteClient::new(&server.api_url).unwrap());
    session.load().await;

    store.collection().set_simulate_failure(true);
    assert_eq!(session.dispatch(Intent::Add("Buy milk".into())).await, Dispatch::Failed);
    assert!(!session.state().adding);
    assert!(session.state().tasks.is_empty());
    assert_eq!(session.state().notices[0].message, "Failed to add task");

    store.collection().set_simulate_failure(false);
    assert_eq!(session.dispatch(Intent::Add("Buy milk".into())).await, Dispatch::Applied);

    server.stop().await;
}
