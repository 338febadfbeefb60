use lsp_server::Connection;
use lsp_types::{InitializeParams, OneOf, ServerCapabilities, TextDocumentSyncCapability, TextDocumentSyncKind};
use tracing::{debug, error, info};

mod server;

pub(crate) fn run_language_server() {
    debug!("Starting NEXUS Language Server");

    let (connection, threads) = Connection::stdio();

    let capabilities = match serde_json::to_value(ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
        document_symbol_provider: Some(OneOf::Left(true)),
        workspace_symbol_provider: Some(OneOf::Left(true)),
        ..Default::default()
    }) {
        Ok(value) => value,
        Err(e) => {
            error!("Unable to encode server capabilities: {}", e);
            return;
        }
    };

    // extract any initialization parameters passed from the editor.
    match connection.initialize(capabilities) {
        Ok(params) => {
            if let Ok(params) = serde_json::from_value::<InitializeParams>(params) {
                if let Some(info) = params.client_info {
                    debug!("Client is {} {:?}", info.name, info.version);
                }
            }

            info!("NEXUS Language Server starting on stdin");

            let server = server::NexusLanguageServer::new();

            if let Err(e) = server.run(connection) {
                eprintln!("Server error: {}", e);
            }
        }
        Err(e) => {
            error!("Language Server initialization failed: {}", e);
        }
    }

    if let Err(e) = threads.join() {
        error!("Language Server I/O threads failed: {}", e);
    }
}
