//! End-to-end tests of the fan-out behavior over real WebSocket connections.

mod common;

use std::time::Duration;

use boardcast_server::config::ServerConfig;
use common::{TestClient, start_server, start_server_with, wait_for_members};
use serde_json::json;

#[tokio::test]
async fn test_connect_publishes_online_users() {
    // テスト項目: 接続すると全員に online-users が配信される
    // given (前提条件):
    let addr = start_server().await;
    let mut alice = TestClient::connect(addr, "a", "Alice").await;
    assert_eq!(
        alice.expect_event("online-users").await,
        json!([{"id": "a", "name": "Alice"}])
    );

    // when (操作):
    let mut bob = TestClient::connect(addr, "b", "Bob").await;

    // then (期待する結果):
    let expected = json!([{"id": "a", "name": "Alice"}, {"id": "b", "name": "Bob"}]);
    assert_eq!(alice.expect_event("online-users").await, expected);
    assert_eq!(bob.expect_event("online-users").await, expected);
}

#[tokio::test]
async fn test_anonymous_connection_is_accepted() {
    // テスト項目: userId 無しの接続も受け付けられ、匿名としてプレゼンスに含まれる
    // given (前提条件):
    let addr = start_server().await;

    // when (操作):
    let mut guest = TestClient::connect_anonymous(addr).await;

    // then (期待する結果):
    assert_eq!(
        guest.expect_event("online-users").await,
        json!([{"id": null, "name": ""}])
    );
}

#[tokio::test]
async fn test_task_moved_reaches_other_members_but_not_sender() {
    // テスト項目: A と B が board-1 に参加し、A の task-moved は B にのみ届く
    // given (前提条件):
    let addr = start_server().await;
    let mut alice = TestClient::connect(addr, "a", "Alice").await;
    let mut bob = TestClient::connect(addr, "b", "Bob").await;
    alice.send("join-board", json!("board-1")).await;
    wait_for_members(addr, "board", "board-1", 1).await;
    bob.send("join-board", json!("board-1")).await;
    assert_eq!(
        alice.expect_event("user-joined-board").await,
        json!({"userId": "b", "userName": "Bob", "boardId": "board-1"})
    );

    // when (操作):
    let payload = json!({"boardId": "board-1", "taskId": "t1", "toColumnId": "done", "position": 2});
    alice.send("task-moved", payload.clone()).await;

    // then (期待する結果):
    assert_eq!(bob.expect_event("task-moved").await, payload);
    alice.expect_no_event("task-moved").await;
}

#[tokio::test]
async fn test_numeric_board_id_joins_and_relays() {
    // テスト項目: 数値のボード ID で参加したメンバーに、数値 boardId のリレーが届く
    // given (前提条件):
    let addr = start_server().await;
    let mut alice = TestClient::connect(addr, "a", "Alice").await;
    let mut bob = TestClient::connect(addr, "b", "Bob").await;
    alice.send("join-board", json!(42)).await;
    bob.send("join-board", json!("42")).await;
    wait_for_members(addr, "board", "42", 2).await;

    // when (操作):
    alice
        .send("task-created", json!({"boardId": 42, "taskId": "t1"}))
        .await;

    // then (期待する結果):
    assert_eq!(
        bob.expect_event("task-created").await,
        json!({"boardId": 42, "taskId": "t1"})
    );
}

#[tokio::test]
async fn test_board_events_do_not_leak_to_other_boards() {
    // テスト項目: 別のボードのメンバーにはイベントが届かない
    // given (前提条件):
    let addr = start_server().await;
    let mut alice = TestClient::connect(addr, "a", "Alice").await;
    let mut carol = TestClient::connect(addr, "c", "Carol").await;
    alice.send("join-board", json!("board-1")).await;
    carol.send("join-board", json!("board-2")).await;
    wait_for_members(addr, "board", "board-1", 1).await;
    wait_for_members(addr, "board", "board-2", 1).await;

    // when (操作):
    alice
        .send("column-created", json!({"boardId": "board-1", "columnId": "c1"}))
        .await;

    // then (期待する結果):
    carol.expect_no_event("column-created").await;
}

#[tokio::test]
async fn test_chat_message_is_echoed_to_whole_group() {
    // テスト項目: A, B, C が general に参加し、A の send-message は A を含む全員に new-message として届く
    // given (前提条件):
    let addr = start_server().await;
    let mut alice = TestClient::connect(addr, "a", "Alice").await;
    let mut bob = TestClient::connect(addr, "b", "Bob").await;
    let mut carol = TestClient::connect(addr, "c", "Carol").await;
    for (client, expected) in [(&mut alice, 1), (&mut bob, 2), (&mut carol, 3)] {
        client.send("join-chat", json!("general")).await;
        wait_for_members(addr, "chat", "general", expected).await;
    }

    // when (操作):
    alice
        .send("send-message", json!({"channelId": "general", "text": "hi"}))
        .await;

    // then (期待する結果):
    let expected = json!({"channelId": "general", "text": "hi"});
    assert_eq!(alice.expect_event("new-message").await, expected);
    assert_eq!(bob.expect_event("new-message").await, expected);
    assert_eq!(carol.expect_event("new-message").await, expected);
}

#[tokio::test]
async fn test_messages_arrive_in_send_order() {
    // テスト項目: 同じグループへの連続したイベントは送信順に届く
    // given (前提条件):
    let addr = start_server().await;
    let mut alice = TestClient::connect(addr, "a", "Alice").await;
    let mut bob = TestClient::connect(addr, "b", "Bob").await;
    alice.send("join-chat", json!("general")).await;
    bob.send("join-chat", json!("general")).await;
    wait_for_members(addr, "chat", "general", 2).await;
    bob.drain().await;

    // when (操作):
    for i in 0..20 {
        alice
            .send("send-message", json!({"channelId": "general", "seq": i}))
            .await;
    }

    // then (期待する結果):
    for i in 0..20 {
        let data = bob.expect_event("new-message").await;
        assert_eq!(data["seq"], json!(i));
    }
}

#[tokio::test]
async fn test_typing_indicator_excludes_sender() {
    // テスト項目: typing-start / typing-stop は送信者以外に userName 付きで届く
    // given (前提条件):
    let addr = start_server().await;
    let mut alice = TestClient::connect(addr, "a", "Alice").await;
    let mut bob = TestClient::connect(addr, "b", "Bob").await;
    alice.send("join-chat", json!("general")).await;
    bob.send("join-chat", json!("general")).await;
    wait_for_members(addr, "chat", "general", 2).await;

    // when (操作):
    alice
        .send("typing-start", json!({"channelId": "general"}))
        .await;
    alice
        .send("typing-stop", json!({"channelId": "general"}))
        .await;

    // then (期待する結果):
    let expected = json!({"userId": "a", "userName": "Alice", "channelId": "general"});
    assert_eq!(bob.expect_event("user-typing").await, expected);
    assert_eq!(bob.expect_event("user-stopped-typing").await, expected);
    alice.expect_no_event("user-typing").await;
}

#[tokio::test]
async fn test_leave_board_notifies_remaining_member() {
    // テスト項目: leave-board すると残りのメンバーに user-left-board が届く
    // given (前提条件):
    let addr = start_server().await;
    let mut alice = TestClient::connect(addr, "a", "Alice").await;
    let mut bob = TestClient::connect(addr, "b", "Bob").await;
    alice.send("join-board", json!("board-1")).await;
    bob.send("join-board", json!("board-1")).await;
    wait_for_members(addr, "board", "board-1", 2).await;

    // when (操作):
    bob.send("leave-board", json!("board-1")).await;

    // then (期待する結果):
    assert_eq!(
        alice.expect_event("user-left-board").await,
        json!({"userId": "b", "userName": "Bob", "boardId": "board-1"})
    );
    wait_for_members(addr, "board", "board-1", 1).await;
}

#[tokio::test]
async fn test_disconnect_cleans_up_groups_and_presence() {
    // テスト項目: A が board-1 と general に参加したまま切断すると、B に user-left-board が1回届き、online-users から A が消える
    // given (前提条件):
    let addr = start_server().await;
    let mut alice = TestClient::connect(addr, "a", "Alice").await;
    let mut bob = TestClient::connect(addr, "b", "Bob").await;
    for client in [&mut alice, &mut bob] {
        client.send("join-board", json!("board-1")).await;
        client.send("join-chat", json!("general")).await;
    }
    wait_for_members(addr, "board", "board-1", 2).await;
    wait_for_members(addr, "chat", "general", 2).await;
    bob.drain().await;

    // when (操作):
    alice.close().await;

    // then (期待する結果):
    assert_eq!(
        bob.expect_event("user-left-board").await,
        json!({"userId": "a", "userName": "Alice", "boardId": "board-1"})
    );
    assert_eq!(
        bob.expect_event("online-users").await,
        json!([{"id": "b", "name": "Bob"}])
    );
    bob.expect_no_event("user-left-board").await;
    wait_for_members(addr, "board", "board-1", 1).await;
    wait_for_members(addr, "chat", "general", 1).await;
}

#[tokio::test]
async fn test_notification_to_user_reaches_all_tabs() {
    // テスト項目: ユーザー宛て通知はそのユーザーの全タブに届き、他のユーザーには届かない
    // given (前提条件):
    let addr = start_server().await;
    let mut alice = TestClient::connect(addr, "a", "Alice").await;
    let mut bob_tab1 = TestClient::connect(addr, "b", "Bob").await;
    let mut bob_tab2 = TestClient::connect(addr, "b", "Bob").await;
    let mut carol = TestClient::connect(addr, "c", "Carol").await;

    // when (操作):
    let payload = json!({"targetUserId": "b", "message": "You were assigned t1"});
    alice.send("send-notification", payload.clone()).await;

    // then (期待する結果):
    assert_eq!(bob_tab1.expect_event("notification").await, payload);
    assert_eq!(bob_tab2.expect_event("notification").await, payload);
    carol.expect_no_event("notification").await;
}

#[tokio::test]
async fn test_malformed_frames_are_dropped_without_closing() {
    // テスト項目: 不正なフレームは破棄され、接続はそのまま使える
    // given (前提条件):
    let addr = start_server().await;
    let mut alice = TestClient::connect(addr, "a", "Alice").await;
    let mut bob = TestClient::connect(addr, "b", "Bob").await;
    alice.send("join-board", json!("board-1")).await;
    bob.send("join-board", json!("board-1")).await;
    wait_for_members(addr, "board", "board-1", 2).await;

    // when (操作):
    alice.send_raw("not json at all").await;
    alice.send("task-created", json!({"taskId": "no-board"})).await;
    alice.send("unknown-event", json!({})).await;
    alice
        .send("task-created", json!({"boardId": "board-1", "taskId": "t2"}))
        .await;

    // then (期待する結果):
    assert_eq!(
        bob.expect_event("task-created").await,
        json!({"boardId": "board-1", "taskId": "t2"})
    );
    bob.expect_no_event("task-created").await;
}

#[tokio::test]
async fn test_presence_is_coalesced_with_debounce_window() {
    // テスト項目: 時間窓を設定すると、連続した接続の online-users が1回にまとめられる
    // given (前提条件):
    let addr = start_server_with(ServerConfig {
        presence_debounce: Duration::from_millis(500),
        ..ServerConfig::default()
    })
    .await;
    let mut alice = TestClient::connect(addr, "a", "Alice").await;
    assert_eq!(alice.expect_event("online-users").await.as_array().unwrap().len(), 1);

    // when (操作):
    let _bob = TestClient::connect(addr, "b", "Bob").await;
    let _carol = TestClient::connect(addr, "c", "Carol").await;
    let _dave = TestClient::connect(addr, "d", "Dave").await;

    // then (期待する結果):
    let users = alice.expect_event("online-users").await;
    assert_eq!(users.as_array().unwrap().len(), 4);
    alice.expect_no_event("online-users").await;
}
