use crate::client::TradingClient;
use crate::tools::ToolRegistry;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Option<Value>,
    pub id: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            result: Some(result),
            error: None,
            id,
        }
    }

    fn failure(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".into(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
            id,
        }
    }
}

/// Serve newline-delimited JSON-RPC on stdio until stdin closes.
pub async fn run(client: &TradingClient, tools: ToolRegistry) -> Result<()> {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    info!(tools = tools.len(), "MCP Server Ready. Waiting for JSON-RPC requests on stdin...");

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        debug!("Received request: {}", line);

        let req: JsonRpcRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                let response = JsonRpcResponse::failure(None, -32700, format!("Parse error: {}", e));
                write_response(&mut stdout, &response).await?;
                continue;
            }
        };

        if let Some(response) = handle_request(&req, client, &tools).await {
            write_response(&mut stdout, &response).await?;
        }
    }

    info!("stdin closed, shutting down");
    Ok(())
}

async fn write_response(stdout: &mut io::Stdout, response: &JsonRpcResponse) -> Result<()> {
    let mut response_str = serde_json::to_string(response)?;
    response_str.push('\n');
    stdout.write_all(response_str.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

/// Dispatch one request. Notifications get no response.
pub async fn handle_request(
    req: &JsonRpcRequest,
    client: &TradingClient,
    tools: &ToolRegistry,
) -> Option<JsonRpcResponse> {
    if req.method.starts_with("notifications/") {
        debug!("Notification {}", req.method);
        return None;
    }

    let id = req.id.clone();
    let response = match req.method.as_str() {
        "initialize" => JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": env!("CARGO_PKG_NAME"),
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        ),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => {
            let mut tool_list: Vec<Value> = tools
                .values()
                .map(|t| {
                    json!({
                        "name": t.name(),
                        "description": t.description(),
                        "inputSchema": t.schema()
                    })
                })
                .collect();
            tool_list.sort_by(|a, b| a["name"].as_str().cmp(&b["name"].as_str()));

            JsonRpcResponse::success(id, json!({ "tools": tool_list }))
        }
        "tools/call" => {
            let Some(params) = &req.params else {
                return Some(JsonRpcResponse::failure(id, -32602, "Missing params"));
            };
            let Some(tool_name) = params.get("name").and_then(|v| v.as_str()) else {
                return Some(JsonRpcResponse::failure(id, -32602, "Missing 'name' parameter"));
            };
            let Some(tool) = tools.get(tool_name) else {
                return Some(JsonRpcResponse::failure(
                    id,
                    -32601,
                    format!("Tool not found: {}", tool_name),
                ));
            };
            let args = params.get("arguments").cloned().unwrap_or(json!({}));

            match tool.call(client, args).await {
                Ok(result) => JsonRpcResponse::success(
                    id,
                    // Standard MCP 'content' for compatibility, plus 'data' for agents.
                    json!({
                        "content": [{
                            "type": "text",
                            "text": serde_json::to_string_pretty(&result).unwrap_or_else(|_| result.to_string())
                        }],
                        "data": result
                    }),
                ),
                Err(e) => {
                    warn!("Tool {} failed: {:#}", tool_name, e);
                    JsonRpcResponse::success(
                        id,
                        json!({
                            "content": [{
                                "type": "text",
                                "text": format!("Error: {}", e)
                            }],
                            "isError": true
                        }),
                    )
                }
            }
        }
        _ => JsonRpcResponse::failure(id, -32601, "Method not found"),
    };

    Some(response)
}
