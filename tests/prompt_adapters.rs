use llm_adapter::api::protocol::ChatCompletionCreateParams;
use llm_adapter::prompt::rules::BUILTIN_ADAPTERS;
use llm_adapter::{prepare_chat, AdapterRegistry, ChatMessage, Role, SharedRegistry, StopPolicy};

fn registry() -> AdapterRegistry {
    AdapterRegistry::builtin().unwrap()
}

#[test]
fn every_family_resolves_from_suffixed_name() {
    let registry = registry();
    for rule in &BUILTIN_ADAPTERS[..7] {
        let model = format!("org/{}-13b-v2", rule.name);
        assert_eq!(registry.resolve(&model).unwrap().name(), rule.name);
    }
    assert_eq!(registry.resolve("llama-2-7b-chat").unwrap().name(), "default");
}

#[test]
fn skipped_roles_never_change_output() {
    let registry = registry();
    let turns = vec![ChatMessage::user("Hi"), ChatMessage::assistant("Hello")];
    let mut noisy = Vec::new();
    for turn in &turns {
        noisy.push(ChatMessage::system("sys"));
        noisy.push(turn.clone());
        noisy.push(ChatMessage::new(Role::Tool, "result"));
        noisy.push(ChatMessage::new(Role::Function, "call"));
    }
    for adapter in registry.adapters() {
        assert_eq!(adapter.render(&turns), adapter.render(&noisy), "{}", adapter.name());
    }
}

#[test]
fn only_skipped_roles_render_preamble() {
    let registry = registry();
    let msgs = vec![
        ChatMessage::system("You are a pirate."),
        ChatMessage::new(Role::Tool, "{}"),
    ];
    for adapter in registry.adapters() {
        let rendered = adapter.render(&msgs);
        assert_eq!(rendered.prompt, adapter.system_preamble());
        assert_eq!(rendered.stop.as_deref(), adapter.stop_sequences());
    }
}

#[test]
fn baize_transcript() {
    let params: ChatCompletionCreateParams = serde_json::from_str(
        r#"{
            "model": "project-baize-v2-7b",
            "messages": [
                {"role": "user", "content": "Hello"},
                {"role": "AI", "content": "Hi there"},
                {"role": "user", "content": "Tell me a joke"}
            ],
            "stop": ["[|AI|]", "\n\n"]
        }"#,
    )
    .unwrap();
    let prepared = prepare_chat(&registry(), &params, StopPolicy::Merge).unwrap();
    assert_eq!(prepared.adapter, "baize");
    assert!(prepared
        .prompt
        .ends_with("[|Human|]Hello\n[|AI|]Hi there\n[|Human|]Tell me a joke\n[|AI|]"));
    assert_eq!(
        prepared.stop,
        Some(vec!["[|AI|]".to_string(), "\n\n".to_string(), "[|Human|]".to_string()])
    );
}

#[test]
fn firefly_and_belle_formats() {
    let registry = registry();
    let msgs = vec![ChatMessage::user("a"), ChatMessage::assistant("b"), ChatMessage::user("c")];

    let firefly = registry.resolve("firefly-1b4").unwrap().render(&msgs);
    assert!(firefly.prompt.ends_with("<s>a</s></s>b</s><s>c</s></s>"));
    assert!(firefly.stop.is_none());

    let belle = registry.resolve("belle-7b-2m").unwrap().render(&msgs);
    assert_eq!(belle.prompt, "Human: a\n\nAssistant: b\n\nHuman: c\n\nAssistant: ");
}

#[test]
fn shared_registry_readers_keep_snapshot() {
    let shared = SharedRegistry::new(registry());
    let before = shared.snapshot();
    shared.replace(AdapterRegistry::new());
    assert_eq!(before.resolve("guanaco").unwrap().name(), "guanaco");
    assert!(shared.snapshot().resolve("guanaco").is_err());
}
