use color_eyre::{eyre::eyre, eyre::WrapErr, Result};
use realtor_agent::openai::{multi_step_tool_answer_blocking, resolve_and_execute_tool_call, ToolCallDecision, ToolResolution};
use realtor_agent::{Config, RealtorClient, RealtorConfig, RealtorToolSpec};
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "usage:
  realtor_agent tools                      list available tools
  realtor_agent call <tool> '<json args>'  run one tool and print its JSON result
  realtor_agent ask \"<question>\"           answer a question with OpenAI + the tools";

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = dotenvy::dotenv();

    // File-only logging keeps stdout for tool output.
    let file_appender = rolling::daily("logs", "realtor_agent.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .wrap_err("building log filter")?;
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{USAGE}");
        return Ok(());
    };

    let tools = || -> Result<RealtorToolSpec> {
        let config = RealtorConfig::from_env()?;
        Ok(RealtorToolSpec::new(RealtorClient::new(&config)?))
    };

    match command.as_str() {
        "tools" => {
            for name in RealtorToolSpec::TOOL_NAMES {
                println!("{name}");
            }
        }
        "call" => {
            let name = args.get(1).ok_or_else(|| eyre!("missing tool name\n{USAGE}"))?;
            let arguments = args.get(2).cloned().unwrap_or_else(|| "{}".to_string());
            let tools = tools()?.tools();
            let decision = ToolCallDecision::ToolCall { id: "cli".to_string(), name: name.clone(), arguments };
            match resolve_and_execute_tool_call(decision, &tools) {
                ToolResolution::Executed { result, .. } => println!("{}", serde_json::to_string_pretty(&result)?),
                other => return Err(eyre!("{other}")),
            }
        }
        "ask" => {
            let question = args[1..].join(" ");
            if question.trim().is_empty() {
                return Err(eyre!("missing question\n{USAGE}"));
            }
            let tools = tools()?.tools();
            let answer = multi_step_tool_answer_blocking(&question, &tools, &Config::from_env())?;
            tracing::info!(iterations = answer.iterations, steps = answer.steps.len(), truncated = answer.truncated, "answered");
            println!("{}", answer.final_answer);
        }
        other => return Err(eyre!("unknown command {other:?}\n{USAGE}")),
    }
    Ok(())
}
