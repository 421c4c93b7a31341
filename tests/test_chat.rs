//! Integration tests for the optimistic chat send.

mod common;

use std::sync::Arc;

use common::*;

#[tokio::test]
async fn test_user_message_visible_before_backend_resolves() -> anyhow::Result<()> {
    let data = sample_data();
    let store = Arc::new(AppStore::new(
        ScriptedGateway::new(data.seed).holding_chat(),
    ));
    store.load_project(data.novel.id).await;
    let mut rx = store.subscribe();

    // 1. Start sending; the backend is held at add_chat_message
    let task = tokio::spawn({
        let store = Arc::clone(&store);
        let project_id = data.novel.id;
        async move { store.send_chat_message(project_id, "hello").await }
    });

    // 2. The optimistic message and loading flag show up first
    let pending = rx.wait_for(|s| s.chat_loading).await?.clone();
    let last = pending.chat_messages.last().expect("provisional message");
    assert_eq!(last.role, ChatRole::User);
    assert_eq!(last.content, "hello");
    assert_eq!(store.gateway().count(command::CHAT_WITH_LLM, data.novel.id), 0);

    // 3. Let the backend answer
    store.gateway().release_chat();
    task.await?;

    let state = store.snapshot();
    assert!(!state.chat_loading);
    let roles: Vec<ChatRole> = state.chat_messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![ChatRole::User, ChatRole::User, ChatRole::Assistant]);
    assert!(!state.chat_messages[2].content.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_failed_reply_keeps_user_message_and_clears_loading() -> anyhow::Result<()> {
    let data = sample_data();
    let store = AppStore::new(ScriptedGateway::new(data.seed));
    store.load_project(data.novel.id).await;
    let before = store.snapshot().chat_messages.len();

    store.gateway().fail(command::CHAT_WITH_LLM);
    store.send_chat_message(data.novel.id, "hello").await;

    let state = store.snapshot();
    assert!(!state.chat_loading);
    assert_eq!(state.chat_messages.len(), before + 1);
    let last = state.chat_messages.last().expect("provisional message");
    assert_eq!(last.role, ChatRole::User);
    assert_eq!(last.content, "hello");

    Ok(())
}

#[tokio::test]
async fn test_failed_persist_skips_reply() -> anyhow::Result<()> {
    let data = sample_data();
    let store = AppStore::new(ScriptedGateway::new(data.seed));
    store.load_project(data.novel.id).await;

    store.gateway().fail(command::ADD_CHAT_MESSAGE);
    store.send_chat_message(data.novel.id, "hello").await;

    let state = store.snapshot();
    assert!(!state.chat_loading);
    assert_eq!(state.chat_messages.last().map(|m| m.role), Some(ChatRole::User));
    assert_eq!(store.gateway().count(command::CHAT_WITH_LLM, data.novel.id), 0);

    Ok(())
}

#[tokio::test]
async fn test_local_ids_are_not_reconciled_with_backend() -> anyhow::Result<()> {
    let data = sample_data();
    let store = AppStore::new(ScriptedGateway::new(data.seed));
    store.load_project(data.novel.id).await;

    store.send_chat_message(data.novel.id, "please translate this").await;
    let local = store.snapshot().chat_messages;

    let backend = store.gateway().backend().get_chat_messages(data.novel.id).await?;
    assert_eq!(backend.len(), local.len());
    let sent_local = &local[local.len() - 2];
    let sent_backend = &backend[backend.len() - 2];
    assert_eq!(sent_local.content, sent_backend.content);
    assert_ne!(sent_local.id, sent_backend.id);

    // A reload replaces the optimistic copies with the backend's
    store.load_chat_messages(data.novel.id).await;
    assert_eq!(store.snapshot().chat_messages, backend);

    Ok(())
}

#[tokio::test]
async fn test_assistant_reply_follows_keywords() -> anyhow::Result<()> {
    let backend = MemoryGateway::new();
    let project = backend.create_project("Novel", None).await?;

    let translate = backend.chat_with_assistant(project.id, "translate this").await?;
    let context = backend.chat_with_assistant(project.id, "what is the context").await?;
    let other = backend.chat_with_assistant(project.id, "hi").await?;

    assert_ne!(translate, context);
    assert_ne!(context, other);
    assert_eq!(backend.get_chat_messages(project.id).await?.len(), 3);

    Ok(())
}
