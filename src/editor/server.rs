use std::collections::HashMap;

use lsp_server::{Connection, Message, Notification, Request, Response};
use lsp_types::{
    Diagnostic, DiagnosticSeverity, DiagnosticTag, DidChangeTextDocumentParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, DidSaveTextDocumentParams,
    DocumentSymbolParams, DocumentSymbolResponse, InitializedParams, Location, NumberOrString,
    Position, PublishDiagnosticsParams, Range, SymbolInformation, SymbolKind, Uri,
    WorkspaceSymbolParams,
};
use serde_json::{from_value, to_value, Value};
use tracing::{debug, error, info, warn};

use nexus_check::parsing;
use nexus_check::validation::{self, Columns, LineIndex, Report, Severity, SourceIndex};

pub struct NexusLanguageServer {
    /// Map from URI to document content
    documents: HashMap<Uri, String>,
}

impl NexusLanguageServer {
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
        }
    }

    /// Main server loop that handles incoming LSP messages
    pub fn run(
        mut self,
        connection: Connection,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>> {
        info!("Starting Language Server main loop");

        for message in &connection.receiver {
            match message {
                Message::Request(request) => {
                    if let Err(err) = self.handle_request(request, &|msg| {
                        connection
                            .sender
                            .send(msg)
                    }) {
                        error!("Error handling request: {}", err);
                    }
                }
                Message::Notification(notification) => {
                    if notification.method == "exit" {
                        break;
                    }

                    if let Err(error) = self.handle_notification(notification, &|message| {
                        connection
                            .sender
                            .send(message)
                    }) {
                        error!("Error handling notification: {}", error);
                    }
                }
                Message::Response(_resp) => {
                    // We don't expect responses as a server
                    warn!("Received unexpected response message");
                }
            }
        }

        Ok(())
    }

    fn handle_request<E>(
        &mut self,
        req: Request,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match req
            .method
            .as_str()
        {
            "textDocument/documentSymbol" => {
                let params: DocumentSymbolParams = from_value(req.params)?;
                let result = self.handle_document_symbol(params);
                let response = Response::new_ok(req.id, result);
                sender(Message::Response(response))?;
            }
            "workspace/symbol" => {
                let params: WorkspaceSymbolParams = from_value(req.params)?;
                let result = self.handle_workspace_symbol(params);
                let response = Response::new_ok(req.id, result);
                sender(Message::Response(response))?;
            }
            "shutdown" => {
                info!("Language Server received shutdown request");
                let response = Response::new_ok(req.id, Value::Null);
                sender(Message::Response(response))?;
            }
            _ => {
                warn!("Unhandled request method: {}", req.method);
                let response = Response::new_err(
                    req.id,
                    lsp_server::ErrorCode::MethodNotFound as i32,
                    format!("Method not found: {}", req.method),
                );
                sender(Message::Response(response))?;
            }
        }
        Ok(())
    }

    fn handle_notification<E>(
        &mut self,
        notification: Notification,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match notification
            .method
            .as_str()
        {
            "initialized" => {
                let _params: InitializedParams = from_value(notification.params)?;
            }
            "textDocument/didOpen" => {
                let params: DidOpenTextDocumentParams = from_value(notification.params)?;
                self.handle_did_open(params, sender)?;
            }
            "textDocument/didChange" => {
                let params: DidChangeTextDocumentParams = from_value(notification.params)?;
                self.handle_did_change(params, sender)?;
            }
            "textDocument/didSave" => {
                let params: DidSaveTextDocumentParams = from_value(notification.params)?;
                self.handle_did_save(params, sender)?;
            }
            "textDocument/didClose" => {
                let params: DidCloseTextDocumentParams = from_value(notification.params)?;
                self.handle_did_close(params, sender)?;
            }
            _ => {
                debug!("Unhandled notification method: {}", notification.method);
            }
        }
        Ok(())
    }

    fn handle_did_open<E>(
        &mut self,
        params: DidOpenTextDocumentParams,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let uri = params
            .text_document
            .uri;
        let content = params
            .text_document
            .text;

        debug!("Document opened: {:?}", uri);

        self.validate_and_report(&uri, &content, sender)?;

        self.documents
            .insert(uri, content);
        Ok(())
    }

    fn handle_did_change<E>(
        &mut self,
        params: DidChangeTextDocumentParams,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let uri = params
            .text_document
            .uri;

        // with FULL sync the last change carries the entire text
        if let Some(change) = params
            .content_changes
            .into_iter()
            .last()
        {
            let content = change.text;

            debug!("Document changed: {:?}", uri);

            self.validate_and_report(&uri, &content, sender)?;

            self.documents
                .insert(uri, content);
        }
        Ok(())
    }

    fn handle_did_save<E>(
        &mut self,
        params: DidSaveTextDocumentParams,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let uri = params
            .text_document
            .uri;
        debug!("Document saved: {:?}", uri);

        if let Some(content) = self
            .documents
            .get(&uri)
        {
            self.validate_and_report(&uri, content, sender)?;
        }
        Ok(())
    }

    fn handle_did_close<E>(
        &mut self,
        params: DidCloseTextDocumentParams,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let uri = params
            .text_document
            .uri;
        debug!("Document closed: {:?}", uri);

        self.documents
            .remove(&uri);

        // Clear diagnostics for closed document
        self.publish_diagnostics(uri, vec![], sender)?;
        Ok(())
    }

    fn handle_document_symbol(&self, params: DocumentSymbolParams) -> DocumentSymbolResponse {
        let uri = params
            .text_document
            .uri;

        debug!("Document symbol request: {:?}", uri);

        match self
            .documents
            .get(&uri)
        {
            Some(content) => DocumentSymbolResponse::Flat(extract_taxa(&uri, content)),
            None => DocumentSymbolResponse::Flat(vec![]),
        }
    }

    fn handle_workspace_symbol(&self, params: WorkspaceSymbolParams) -> Option<Vec<SymbolInformation>> {
        let query = params
            .query
            .to_lowercase();
        debug!("Workspace symbol request: query={:?}", query);

        let mut all_symbols = Vec::new();

        // Search through all open documents
        for (uri, content) in &self.documents {
            for symbol in extract_taxa(uri, content) {
                if query.is_empty()
                    || symbol
                        .name
                        .to_lowercase()
                        .contains(&query)
                {
                    all_symbols.push(symbol);
                }
            }
        }

        Some(all_symbols)
    }

    /// Validate document and publish the complete set of diagnostics,
    /// replacing whatever was published for it before.
    fn validate_and_report<E>(
        &self,
        uri: &Uri,
        content: &str,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let index = SourceIndex::new(content, Columns::Utf16);
        let report = validation::validate(content, &index);

        debug!(
            "{:?}: {} diagnostic{}",
            uri,
            report
                .diagnostics
                .len(),
            if report
                .diagnostics
                .len()
                == 1
            {
                ""
            } else {
                "s"
            }
        );

        let diagnostics = convert_report(report);
        self.publish_diagnostics(uri.clone(), diagnostics, sender)
    }

    fn publish_diagnostics<E>(
        &self,
        uri: Uri,
        diagnostics: Vec<Diagnostic>,
        sender: &dyn Fn(Message) -> Result<(), E>,
    ) -> Result<(), Box<dyn std::error::Error + Sync + Send>>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let params = PublishDiagnosticsParams {
            uri,
            diagnostics,
            version: None,
        };

        let notification = Notification::new(
            "textDocument/publishDiagnostics".to_string(),
            to_value(params)?,
        );

        sender(Message::Notification(notification))?;
        Ok(())
    }
}

/// List the taxa of a document as symbols, located at the row where each
/// was first declared.
fn extract_taxa(uri: &Uri, content: &str) -> Vec<SymbolInformation> {
    let index = SourceIndex::new(content, Columns::Utf16);
    let (_, matrix) = parsing::parse(content);

    matrix
        .taxa()
        .map(|taxon| {
            let span = taxon
                .rows
                .first()
                .copied()
                .unwrap_or_default();

            #[allow(deprecated)]
            let symbol = SymbolInformation {
                name: taxon
                    .name
                    .clone(),
                kind: SymbolKind::VARIABLE,
                tags: None,
                deprecated: None, // deprecated but still required, how annoying
                location: Location {
                    uri: uri.clone(),
                    range: Range {
                        start: offset_to_position(&index, span.offset),
                        end: offset_to_position(&index, span.end()),
                    },
                },
                container_name: Some("MATRIX".to_string()),
            };
            symbol
        })
        .collect()
}

/// Convert a validation Report into LSP diagnostics. The region swallowed by
/// an unclosed comment goes out as a faded hint rather than another error.
fn convert_report(report: Report) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for diagnostic in report.diagnostics {
        let severity = match diagnostic.severity {
            Severity::Error => DiagnosticSeverity::ERROR,
            Severity::Warning => DiagnosticSeverity::WARNING,
        };

        diagnostics.push(Diagnostic {
            range: convert_range(&diagnostic.range),
            severity: Some(severity),
            code: Some(NumberOrString::String(
                diagnostic
                    .code
                    .to_string(),
            )),
            code_description: None,
            source: Some("nexus-check".to_string()),
            message: diagnostic.message,
            related_information: None,
            tags: None,
            data: None,
        });
    }

    for highlight in report.highlights {
        diagnostics.push(Diagnostic {
            range: convert_range(&highlight.range),
            severity: Some(DiagnosticSeverity::HINT),
            code: None,
            code_description: None,
            source: Some("nexus-check".to_string()),
            message: highlight.message,
            related_information: None,
            tags: Some(vec![DiagnosticTag::UNNECESSARY]),
            data: None,
        });
    }

    diagnostics
}

fn convert_range(range: &validation::Range) -> Range {
    Range {
        start: convert_position(range.start),
        end: convert_position(range.end),
    }
}

fn convert_position(position: validation::Position) -> Position {
    Position {
        line: position.line as u32,
        character: position.column as u32,
    }
}

/// Convert byte offset to LSP Position
fn offset_to_position(index: &impl LineIndex, offset: usize) -> Position {
    convert_position(index.offset_to_position(offset))
}
