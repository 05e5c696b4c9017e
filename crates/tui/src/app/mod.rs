use std::time::Duration;

use chrono::Utc;
use crossterm::event::{self, Event, KeyEvent};

use api_types::{
    customer::{self, CreateCustomerRequest, CustomerData},
    order as wire,
};
use engine::{
    CartItem, CheckoutSession, CreditCard, CustomerChoice, CustomerInfo, PaymentMethod, SplitMode,
    order_code,
};

use crate::{
    client::{Client, CustomerQuery, message_for_error},
    config::AppConfig,
    error::{AppError, Result},
    ui,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Checkout,
    Customers,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Checkout => "Checkout",
            Self::Customers => "Clientes",
        }
    }
}

/// Which checkout field is capturing keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutField {
    Amount,
    Installments,
    SplitAmount,
    CustomerId,
    CustomerName,
    CustomerEmail,
    CustomerDocument,
    CardToken,
    OrderId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutMode {
    View,
    Edit(CheckoutField),
}

#[derive(Debug)]
pub struct CheckoutState {
    pub mode: CheckoutMode,
    pub amount_input: String,
    pub installments_input: String,
    pub split_input: String,
    pub customer_id_input: String,
    pub customer_name_input: String,
    pub customer_email_input: String,
    pub customer_document_input: String,
    pub card_token_input: String,
    pub order_id_input: String,
    pub method: PaymentMethod,
    pub selected_entry: usize,
    pub loading_filiais: bool,
    pub loading_secret: bool,
    pub is_loading: bool,
    pub message: Option<String>,
    pub result: Vec<String>,
}

impl CheckoutState {
    fn new(installments: u32) -> Self {
        Self {
            mode: CheckoutMode::View,
            amount_input: String::new(),
            installments_input: installments.to_string(),
            split_input: String::new(),
            customer_id_input: String::new(),
            customer_name_input: String::new(),
            customer_email_input: String::new(),
            customer_document_input: String::new(),
            card_token_input: String::new(),
            order_id_input: String::new(),
            method: PaymentMethod::PaymentLink { installments },
            selected_entry: 0,
            loading_filiais: false,
            loading_secret: false,
            is_loading: false,
            message: None,
            result: Vec::new(),
        }
    }

    pub fn installments(&self) -> u32 {
        self.installments_input.parse().unwrap_or(1).max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerFormField {
    Name,
    Email,
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomersMode {
    List,
    Create(CustomerFormField),
}

#[derive(Debug)]
pub struct CustomersState {
    pub mode: CustomersMode,
    pub form_name: String,
    pub form_email: String,
    pub form_document: String,
    pub items: Vec<CustomerData>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub is_loading: bool,
    pub message: Option<String>,
    pub success: Option<String>,
}

impl CustomersState {
    fn new(page_size: u32) -> Self {
        Self {
            mode: CustomersMode::List,
            form_name: String::new(),
            form_email: String::new(),
            form_document: String::new(),
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size,
            is_loading: false,
            message: None,
            success: None,
        }
    }

    fn reset_form(&mut self) {
        self.form_name.clear();
        self.form_email.clear();
        self.form_document.clear();
    }
}

#[derive(Debug)]
pub struct AppState {
    pub section: Section,
    pub session: CheckoutSession,
    pub checkout: CheckoutState,
    pub customers: CustomersState,
    pub base_url: String,
}

pub struct App {
    config: AppConfig,
    client: Client,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let state = AppState {
            section: Section::Checkout,
            session: CheckoutSession::new(),
            checkout: CheckoutState::new(config.installments),
            customers: CustomersState::new(config.page_size),
            base_url: config.base_url.clone(),
        };

        Ok(Self {
            config,
            client,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        self.load_filiais().await;
        if !self.config.filial.is_empty() {
            let filial = self.config.filial.clone();
            self.select_branch(&filial).await;
        }
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match crate::ui::keymap::map_key(key) {
            crate::ui::keymap::AppAction::Quit => {
                self.should_quit = true;
            }
            crate::ui::keymap::AppAction::Cancel => self.leave_edit(),
            crate::ui::keymap::AppAction::NextField => self.advance_focus(),
            crate::ui::keymap::AppAction::Submit => self.handle_submit().await?,
            crate::ui::keymap::AppAction::Backspace => self.handle_backspace(),
            crate::ui::keymap::AppAction::Up => self.move_selection(-1),
            crate::ui::keymap::AppAction::Down => self.move_selection(1),
            crate::ui::keymap::AppAction::Input(ch) => self.handle_char(ch).await?,
            crate::ui::keymap::AppAction::None => {}
        }

        Ok(())
    }

    fn editing(&self) -> bool {
        match self.state.section {
            Section::Checkout => self.state.checkout.mode != CheckoutMode::View,
            Section::Customers => matches!(self.state.customers.mode, CustomersMode::Create(_)),
        }
    }

    fn leave_edit(&mut self) {
        match self.state.section {
            Section::Checkout => {
                self.sync_customer_choice();
                self.state.checkout.mode = CheckoutMode::View;
            }
            Section::Customers => self.state.customers.mode = CustomersMode::List,
        }
    }

    fn advance_focus(&mut self) {
        match self.state.section {
            Section::Checkout => {
                let next = match self.state.checkout.mode {
                    CheckoutMode::Edit(CheckoutField::CustomerName) => {
                        Some(CheckoutField::CustomerEmail)
                    }
                    CheckoutMode::Edit(CheckoutField::CustomerEmail) => {
                        Some(CheckoutField::CustomerDocument)
                    }
                    CheckoutMode::Edit(CheckoutField::CustomerDocument) => {
                        Some(CheckoutField::CustomerName)
                    }
                    _ => None,
                };
                if let Some(field) = next {
                    self.state.checkout.mode = CheckoutMode::Edit(field);
                }
            }
            Section::Customers => {
                if let CustomersMode::Create(field) = self.state.customers.mode {
                    let next = match field {
                        CustomerFormField::Name => CustomerFormField::Email,
                        CustomerFormField::Email => CustomerFormField::Document,
                        CustomerFormField::Document => CustomerFormField::Name,
                    };
                    self.state.customers.mode = CustomersMode::Create(next);
                }
            }
        }
    }

    fn move_selection(&mut self, delta: i64) {
        if self.state.section != Section::Checkout {
            return;
        }
        let len = self.state.session.split.entries.len();
        if len == 0 {
            return;
        }
        let current = self.state.checkout.selected_entry as i64;
        let next = (current + delta).clamp(0, len as i64 - 1);
        self.state.checkout.selected_entry = next as usize;
    }

    fn handle_backspace(&mut self) {
        if !self.editing() {
            return;
        }
        match self.state.section {
            Section::Checkout => {
                if let CheckoutMode::Edit(field) = self.state.checkout.mode {
                    self.pop_checkout_field(field);
                }
            }
            Section::Customers => {
                if let CustomersMode::Create(field) = self.state.customers.mode {
                    let buffer = match field {
                        CustomerFormField::Name => &mut self.state.customers.form_name,
                        CustomerFormField::Email => &mut self.state.customers.form_email,
                        CustomerFormField::Document => &mut self.state.customers.form_document,
                    };
                    buffer.pop();
                }
            }
        }
    }

    async fn handle_char(&mut self, ch: char) -> Result<()> {
        if self.editing() {
            match self.state.section {
                Section::Checkout => {
                    if let CheckoutMode::Edit(field) = self.state.checkout.mode {
                        self.push_checkout_field(field, ch);
                    }
                }
                Section::Customers => {
                    if let CustomersMode::Create(field) = self.state.customers.mode {
                        let buffer = match field {
                            CustomerFormField::Name => &mut self.state.customers.form_name,
                            CustomerFormField::Email => &mut self.state.customers.form_email,
                            CustomerFormField::Document => &mut self.state.customers.form_document,
                        };
                        buffer.push(ch);
                    }
                }
            }
            return Ok(());
        }

        match ch {
            'q' | 'Q' => self.should_quit = true,
            '1' => self.state.section = Section::Checkout,
            '2' => self.state.section = Section::Customers,
            _ => match self.state.section {
                Section::Checkout => self.handle_checkout_command(ch).await?,
                Section::Customers => self.handle_customers_command(ch).await?,
            },
        }

        Ok(())
    }

    async fn handle_checkout_command(&mut self, ch: char) -> Result<()> {
        match ch {
            'a' => self.state.checkout.mode = CheckoutMode::Edit(CheckoutField::Amount),
            'i' => self.state.checkout.mode = CheckoutMode::Edit(CheckoutField::Installments),
            'c' => self.state.checkout.mode = CheckoutMode::Edit(CheckoutField::CustomerId),
            'n' => self.state.checkout.mode = CheckoutMode::Edit(CheckoutField::CustomerName),
            'l' => self.state.checkout.mode = CheckoutMode::Edit(CheckoutField::CustomerEmail),
            'd' => self.state.checkout.mode = CheckoutMode::Edit(CheckoutField::CustomerDocument),
            't' => self.state.checkout.mode = CheckoutMode::Edit(CheckoutField::CardToken),
            'o' => self.state.checkout.mode = CheckoutMode::Edit(CheckoutField::OrderId),
            'e' => {
                if !self.state.session.split.entries.is_empty() {
                    let index = self.state.checkout.selected_entry;
                    let amount = self.state.session.split.entries[index].amount;
                    self.state.checkout.split_input =
                        if amount > 0 { amount.to_string() } else { String::new() };
                    self.state.checkout.mode = CheckoutMode::Edit(CheckoutField::SplitAmount);
                }
            }
            's' => {
                self.state.session.split.add_entry();
                self.state.checkout.selected_entry = self.state.session.split.entries.len() - 1;
            }
            'm' => {
                let next = match self.state.session.split.mode {
                    SplitMode::Percentage => SplitMode::Flat,
                    SplitMode::Flat => SplitMode::Percentage,
                };
                self.state.session.split.set_mode(next);
            }
            'r' => self.cycle_recipient(),
            'b' => self.cycle_branch().await,
            'f' => self.load_filiais().await,
            'p' => self.cycle_method(),
            'x' => {
                self.state.session.reset();
                let installments = self.config.installments;
                self.state.checkout = CheckoutState::new(installments);
            }
            'g' => self.check_order_status().await,
            _ => {}
        }
        Ok(())
    }

    async fn handle_customers_command(&mut self, ch: char) -> Result<()> {
        match ch {
            'c' => {
                self.state.customers.message = None;
                self.state.customers.success = None;
                self.state.customers.mode = CustomersMode::Create(CustomerFormField::Name);
            }
            'r' => self.load_customers().await,
            'n' => {
                self.state.customers.page += 1;
                self.load_customers().await;
            }
            'p' => {
                if self.state.customers.page > 1 {
                    self.state.customers.page -= 1;
                    self.load_customers().await;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn push_checkout_field(&mut self, field: CheckoutField, ch: char) {
        let checkout = &mut self.state.checkout;
        match field {
            CheckoutField::Amount => {
                checkout.amount_input.push(ch);
                self.state.session.set_amount_text(&checkout.amount_input);
            }
            CheckoutField::Installments => {
                if ch.is_ascii_digit() {
                    checkout.installments_input.push(ch);
                }
            }
            CheckoutField::SplitAmount => {
                if ch.is_ascii_digit() {
                    checkout.split_input.push(ch);
                    self.state
                        .session
                        .split
                        .set_entry_amount(checkout.selected_entry, &checkout.split_input);
                }
            }
            CheckoutField::CustomerId => checkout.customer_id_input.push(ch),
            CheckoutField::CustomerName => checkout.customer_name_input.push(ch),
            CheckoutField::CustomerEmail => checkout.customer_email_input.push(ch),
            CheckoutField::CustomerDocument => checkout.customer_document_input.push(ch),
            CheckoutField::CardToken => checkout.card_token_input.push(ch),
            CheckoutField::OrderId => checkout.order_id_input.push(ch),
        }
    }

    fn pop_checkout_field(&mut self, field: CheckoutField) {
        let checkout = &mut self.state.checkout;
        match field {
            CheckoutField::Amount => {
                checkout.amount_input.pop();
                self.state.session.set_amount_text(&checkout.amount_input);
            }
            CheckoutField::Installments => {
                checkout.installments_input.pop();
            }
            CheckoutField::SplitAmount => {
                checkout.split_input.pop();
                self.state
                    .session
                    .split
                    .set_entry_amount(checkout.selected_entry, &checkout.split_input);
            }
            CheckoutField::CustomerId => {
                checkout.customer_id_input.pop();
            }
            CheckoutField::CustomerName => {
                checkout.customer_name_input.pop();
            }
            CheckoutField::CustomerEmail => {
                checkout.customer_email_input.pop();
            }
            CheckoutField::CustomerDocument => {
                checkout.customer_document_input.pop();
            }
            CheckoutField::CardToken => {
                checkout.card_token_input.pop();
            }
            CheckoutField::OrderId => {
                checkout.order_id_input.pop();
            }
        }
    }

    /// Recomputes the session's customer choice from the inputs. An
    /// existing id wins; otherwise a filled name makes an inline
    /// record; both empty means no customer.
    fn sync_customer_choice(&mut self) {
        let checkout = &self.state.checkout;
        let id = checkout.customer_id_input.trim();
        self.state.session.customer = if !id.is_empty() {
            CustomerChoice::Existing(id.to_string())
        } else if !checkout.customer_name_input.trim().is_empty() {
            CustomerChoice::Inline(CustomerInfo {
                name: checkout.customer_name_input.trim().to_string(),
                email: checkout.customer_email_input.trim().to_string(),
                document: checkout.customer_document_input.trim().to_string(),
                ..CustomerInfo::default()
            })
        } else {
            CustomerChoice::None
        };
    }

    fn cycle_recipient(&mut self) {
        let index = self.state.checkout.selected_entry;
        if self.state.session.split.entries.is_empty() {
            return;
        }
        let recipients = self.state.session.recipients().to_vec();
        if recipients.is_empty() {
            self.state.checkout.message =
                Some("Selecione uma filial para listar recebedores.".to_string());
            return;
        }
        let current = &self.state.session.split.entries[index].recipient_id;
        let position = recipients.iter().position(|r| &r.id == current);
        let next = match position {
            Some(pos) => (pos + 1) % recipients.len(),
            None => 0,
        };
        let next_id = recipients[next].id.clone();
        self.state
            .session
            .split
            .bind_recipient(index, &next_id, &recipients);
    }

    fn cycle_method(&mut self) {
        let installments = self.state.checkout.installments();
        let card_token = self.state.checkout.card_token_input.trim();
        self.state.checkout.method = match self.state.checkout.method {
            PaymentMethod::PaymentLink { .. } => PaymentMethod::Pix {
                expires_in_secs: 86_400,
            },
            PaymentMethod::Pix { .. } => PaymentMethod::Boleto {
                instructions: None,
                due_at: None,
            },
            PaymentMethod::Boleto { .. } => PaymentMethod::CreditCard(CreditCard {
                card_token: if card_token.is_empty() {
                    None
                } else {
                    Some(card_token.to_string())
                },
                installments,
                ..CreditCard::default()
            }),
            PaymentMethod::CreditCard(_) => PaymentMethod::PaymentLink { installments },
        };
    }

    async fn cycle_branch(&mut self) {
        let mut keys: Vec<String> = self.state.session.branches().keys().cloned().collect();
        keys.sort();
        if keys.is_empty() {
            self.state.checkout.message =
                Some("Nenhuma filial carregada. Pressione 'f' para recarregar.".to_string());
            return;
        }
        let next = match self.state.session.selected_branch_id() {
            Some(current) => {
                let position = keys.iter().position(|k| k == current);
                match position {
                    Some(pos) => keys[(pos + 1) % keys.len()].clone(),
                    None => keys[0].clone(),
                }
            }
            None => keys[0].clone(),
        };
        self.select_branch(&next).await;
    }

    async fn load_filiais(&mut self) {
        self.state.checkout.loading_filiais = true;
        self.state.checkout.message = None;

        match self.client.filiais_list().await {
            Ok(res) if res.success => {
                let branches = res
                    .filiais
                    .into_iter()
                    .map(|(id, filial)| {
                        (
                            id,
                            engine::Branch {
                                nome: filial.nome,
                                public_key: filial.public_key,
                                recebedores: filial
                                    .recebedores
                                    .into_iter()
                                    .map(|r| engine::Recipient {
                                        id: r.id,
                                        nome: r.nome,
                                        liable: r.liable,
                                    })
                                    .collect(),
                            },
                        )
                    })
                    .collect();
                self.state.session.set_branches(branches);
            }
            Ok(res) => {
                self.state.checkout.message =
                    Some(res.error.unwrap_or_else(|| "Erro ao listar filiais".to_string()));
            }
            Err(err) => {
                self.state.checkout.message = Some(message_for_error(err));
            }
        }
        self.state.checkout.loading_filiais = false;
    }

    /// Selects a branch and lazily fetches its secret. The generation
    /// returned by the session ties the response to this selection;
    /// if the user switches branches meanwhile the reply is dropped.
    async fn select_branch(&mut self, branch_id: &str) {
        let generation = self.state.session.select_branch(branch_id);
        self.state.checkout.loading_secret = true;
        self.state.checkout.message = None;

        match self.client.filial_secret(branch_id).await {
            Ok(res) if res.success => match res.secret_key {
                Some(secret) => {
                    if !self.state.session.apply_secret(generation, secret) {
                        tracing::debug!(branch_id, "discarded stale secret response");
                    }
                }
                None => {
                    self.state.checkout.message =
                        Some("Resposta sem chave secreta.".to_string());
                }
            },
            Ok(res) => {
                self.state.checkout.message = Some(
                    res.error
                        .unwrap_or_else(|| "Erro ao buscar chave da filial".to_string()),
                );
            }
            Err(err) => {
                self.state.checkout.message = Some(message_for_error(err));
            }
        }
        self.state.checkout.loading_secret = false;
    }

    async fn handle_submit(&mut self) -> Result<()> {
        match self.state.section {
            Section::Checkout => {
                if self.editing() {
                    self.leave_edit();
                } else {
                    self.submit_checkout().await;
                }
            }
            Section::Customers => self.submit_customer().await,
        }
        Ok(())
    }

    async fn submit_checkout(&mut self) {
        self.sync_customer_choice();
        let method = self.current_method();

        // The gate: nothing leaves this client unless the session is
        // fully consistent.
        if let Err(err) = self.state.session.ready_to_submit(method.needs_customer()) {
            self.state.checkout.message = Some(err.to_string());
            return;
        }
        let Some(secret_key) = self.state.session.secret_key().map(str::to_string) else {
            return;
        };

        self.state.checkout.is_loading = true;
        self.state.checkout.message = None;
        self.state.checkout.result.clear();

        let items = vec![wire_item(&self.state.session.item)];
        let split = wire_split(&self.state.session);

        let response = match &method {
            PaymentMethod::PaymentLink { installments } => {
                let payload = wire::CreatePaymentLinkRequest {
                    amount: self.state.session.amount().minor(),
                    installments: *installments,
                    items,
                    split,
                    secret_key,
                };
                self.client.payment_link_create(&payload).await
            }
            other => {
                let payload = self.order_payload(other, items, split, secret_key);
                self.client.order_create(other, &payload).await
            }
        };

        match response {
            Ok(res) => self.render_outcome(&method, res),
            Err(err) => self.state.checkout.message = Some(message_for_error(err)),
        }
        self.state.checkout.is_loading = false;
    }

    /// The configured method with live installments / card token
    /// patched in from the inputs.
    fn current_method(&self) -> PaymentMethod {
        let installments = self.state.checkout.installments();
        let card_token = self.state.checkout.card_token_input.trim();
        match &self.state.checkout.method {
            PaymentMethod::PaymentLink { .. } => PaymentMethod::PaymentLink { installments },
            PaymentMethod::Pix { expires_in_secs } => PaymentMethod::Pix {
                expires_in_secs: *expires_in_secs,
            },
            PaymentMethod::Boleto {
                instructions,
                due_at,
            } => PaymentMethod::Boleto {
                instructions: instructions.clone(),
                due_at: *due_at,
            },
            PaymentMethod::CreditCard(card) => PaymentMethod::CreditCard(CreditCard {
                card_token: if card_token.is_empty() {
                    card.card_token.clone()
                } else {
                    Some(card_token.to_string())
                },
                installments,
                ..card.clone()
            }),
        }
    }

    fn order_payload(
        &self,
        method: &PaymentMethod,
        items: Vec<wire::CartItem>,
        split: Vec<wire::SplitRule>,
        secret_key: String,
    ) -> wire::CreateOrderRequest {
        let (customer_id, customer) = match &self.state.session.customer {
            CustomerChoice::Existing(id) => (Some(id.clone()), None),
            CustomerChoice::Inline(info) => (None, Some(wire_customer(info))),
            CustomerChoice::None => (None, None),
        };

        let (credit_card, pix, boleto) = match method {
            PaymentMethod::CreditCard(card) => (
                Some(wire::CreditCard {
                    card_token: card.card_token.clone(),
                    card_id: card.card_id.clone(),
                    installments: card.installments,
                    operation_type: Some(card.operation_type.as_str().to_string()),
                    statement_descriptor: card.statement_descriptor.clone(),
                }),
                None,
                None,
            ),
            PaymentMethod::Pix { expires_in_secs } => (
                None,
                Some(wire::Pix {
                    expires_in: Some(*expires_in_secs),
                }),
                None,
            ),
            PaymentMethod::Boleto {
                instructions,
                due_at,
            } => (
                None,
                None,
                Some(wire::Boleto {
                    instructions: instructions.clone(),
                    due_at: *due_at,
                }),
            ),
            PaymentMethod::PaymentLink { .. } => (None, None, None),
        };

        wire::CreateOrderRequest {
            code: Some(order_code(Utc::now())),
            items,
            payment_method: method.as_str().to_string(),
            customer_id,
            customer,
            split,
            secret_key,
            credit_card,
            pix,
            boleto,
        }
    }

    fn render_outcome(&mut self, method: &PaymentMethod, res: wire::PaymentResponse) {
        if let Some(error) = res.error {
            self.state.checkout.message = Some(error);
            return;
        }

        let lines = &mut self.state.checkout.result;
        match method {
            PaymentMethod::PaymentLink { .. } => {
                if let Some(url) = res.checkout_url {
                    lines.push(format!("Link de pagamento: {url}"));
                }
            }
            PaymentMethod::Pix { .. } => {
                if let Some(code) = res.pix_qr_code {
                    lines.push(format!("PIX copia e cola: {code}"));
                }
                if let Some(url) = res.pix_qr_code_url {
                    lines.push(format!("QR Code: {url}"));
                }
            }
            PaymentMethod::Boleto { .. } => {
                if let Some(barcode) = res.boleto_barcode {
                    lines.push(format!("Código de barras: {barcode}"));
                }
                if let Some(url) = res.boleto_url {
                    lines.push(format!("Boleto: {url}"));
                }
                if let Some(pdf) = res.boleto_pdf {
                    lines.push(format!("PDF: {pdf}"));
                }
            }
            PaymentMethod::CreditCard(_) => {
                if let Some(id) = res.transaction_id {
                    lines.push(format!("Transação: {id}"));
                }
                if let Some(status) = res.status {
                    lines.push(format!("Status: {status}"));
                }
            }
        }
        if lines.is_empty() {
            lines.push("Pedido criado.".to_string());
        }
    }

    async fn check_order_status(&mut self) {
        let order_id = self.state.checkout.order_id_input.trim().to_string();
        if order_id.is_empty() {
            self.state.checkout.message =
                Some("Informe o id do pedido (tecla 'o').".to_string());
            return;
        }
        let Some(secret_key) = self.state.session.secret_key().map(str::to_string) else {
            self.state.checkout.message =
                Some(engine::CheckoutError::SecretNotLoaded.to_string());
            return;
        };

        self.state.checkout.is_loading = true;
        match self.client.order_status(&order_id, &secret_key).await {
            Ok(status) => {
                let line = format!(
                    "Pedido {}: {}",
                    status.code.or(status.id).unwrap_or(order_id),
                    status.status.unwrap_or_else(|| "desconhecido".to_string())
                );
                self.state.checkout.result.push(line);
            }
            Err(err) => self.state.checkout.message = Some(message_for_error(err)),
        }
        self.state.checkout.is_loading = false;
    }

    async fn load_customers(&mut self) {
        let Some(filial_id) = self
            .state
            .session
            .selected_branch_id()
            .map(str::to_string)
        else {
            self.state.customers.message =
                Some("Selecione uma filial na aba Checkout.".to_string());
            return;
        };

        self.state.customers.is_loading = true;
        self.state.customers.message = None;

        let query = CustomerQuery {
            page: self.state.customers.page,
            size: self.state.customers.page_size,
            ..CustomerQuery::default()
        };

        match self.client.customers_list(&filial_id, &query).await {
            Ok(res) if res.success => {
                let page = res.data.unwrap_or_default();
                self.state.customers.total = page
                    .paging
                    .map(|p| p.total)
                    .unwrap_or(page.data.len() as u64);
                self.state.customers.items = page.data;
            }
            Ok(res) => {
                self.state.customers.message =
                    Some(res.error.unwrap_or_else(|| "Erro ao carregar clientes".to_string()));
            }
            Err(err) => {
                self.state.customers.message = Some(message_for_error(err));
            }
        }
        self.state.customers.is_loading = false;
    }

    async fn submit_customer(&mut self) {
        if self.state.customers.mode == CustomersMode::List {
            self.load_customers().await;
            return;
        }

        let Some(filial_id) = self
            .state
            .session
            .selected_branch_id()
            .map(str::to_string)
        else {
            self.state.customers.message =
                Some("Selecione uma filial na aba Checkout.".to_string());
            return;
        };
        if self.state.customers.form_name.trim().is_empty() {
            self.state.customers.message = Some("Nome é obrigatório!".to_string());
            return;
        }

        self.state.customers.is_loading = true;
        self.state.customers.message = None;
        self.state.customers.success = None;

        let payload = CreateCustomerRequest {
            filial_id,
            customer: customer::Customer {
                name: self.state.customers.form_name.trim().to_string(),
                email: optional(&self.state.customers.form_email),
                document: optional(&self.state.customers.form_document),
                document_type: Some("CPF".to_string()),
                customer_type: Some("individual".to_string()),
                ..customer::Customer::default()
            },
        };

        match self.client.customer_create(&payload).await {
            Ok(res) if res.success => {
                let created = res.customer.unwrap_or_default();
                self.state.customers.success = Some(format!(
                    "Cliente \"{}\" criado com sucesso! ID: {}",
                    created.name, created.id
                ));
                self.state.customers.reset_form();
                self.state.customers.mode = CustomersMode::List;
            }
            Ok(res) => {
                self.state.customers.message =
                    Some(res.error.unwrap_or_else(|| "Erro ao criar cliente".to_string()));
            }
            Err(err) => {
                self.state.customers.message = Some(message_for_error(err));
            }
        }
        self.state.customers.is_loading = false;
    }
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn wire_item(item: &CartItem) -> wire::CartItem {
    wire::CartItem {
        name: item.name.clone(),
        description: item.description.clone(),
        amount: item.amount.minor(),
        default_quantity: item.default_quantity,
        code: None,
    }
}

fn wire_split(session: &CheckoutSession) -> Vec<wire::SplitRule> {
    session
        .split
        .entries
        .iter()
        .map(|entry| wire::SplitRule {
            recipient_id: entry.recipient_id.clone(),
            amount: entry.amount,
            split_type: match entry.mode {
                SplitMode::Percentage => wire::SplitType::Percentage,
                SplitMode::Flat => wire::SplitType::Flat,
            },
            liable: entry.liable,
        })
        .collect()
}

fn wire_customer(info: &CustomerInfo) -> customer::Customer {
    customer::Customer {
        name: info.name.clone(),
        email: optional(&info.email),
        document: optional(&info.document),
        document_type: Some(info.document_type.as_str().to_string()),
        customer_type: Some(info.customer_type.as_str().to_string()),
        ..customer::Customer::default()
    }
}
