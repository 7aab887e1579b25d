use std::io::{self, Write};

use super::config::{OutputConfig, OutputFormat};
use super::types::{Envelope, Meta, Report};
use crate::ingestion::types::{Metadata, SiteViewModel};
use crate::util::time::display_timestamp;

pub trait Presenter: Send + Sync {
    fn emit(&self, op: &'static str, report: &Report<'_>, meta: Option<Meta>, w: &mut dyn Write) -> io::Result<()>;
}

pub struct JsonPresenter { pub pretty: bool }
impl Presenter for JsonPresenter {
    fn emit(&self, op: &'static str, report: &Report<'_>, meta: Option<Meta>, w: &mut dyn Write) -> io::Result<()> {
        let env = Envelope::from_report(op, report, meta).map_err(to_io)?;
        if self.pretty { serde_json::to_writer_pretty(&mut *w, &env).map_err(to_io)? } else { serde_json::to_writer(&mut *w, &env).map_err(to_io)? }
        writeln!(w)
    }
}

pub struct TextPresenter { pub pretty: bool }
impl Presenter for TextPresenter {
    fn emit(&self, _op: &'static str, report: &Report<'_>, _meta: Option<Meta>, w: &mut dyn Write) -> io::Result<()> {
        match report {
            Report::Plan(plan) => {
                if plan.valid {
                    writeln!(w, "Plan: fetch {}", plan.url)?;
                } else {
                    writeln!(w, "Plan: rejected {} ({})", plan.url, plan.reason.as_deref().unwrap_or("invalid"))?;
                }
                Ok(())
            }
            Report::Site(vm) => self.site(vm, w),
            Report::Failure { message, .. } => writeln!(w, "Error: {}", message),
        }
    }
}

impl TextPresenter {
    fn site(&self, vm: &SiteViewModel, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "Title: {}", vm.summary.title)?;
        if !vm.summary.description.is_empty() { writeln!(w, "{}", vm.summary.description)?; }
        write_metadata(&vm.summary.metadata, w)?;
        writeln!(w, "Source: {}", vm.source_url)?;

        if vm.cards.is_empty() {
            writeln!(w)?;
            return writeln!(w, "No items.");
        }
        for (i, card) in vm.cards.iter().enumerate() {
            writeln!(w)?;
            writeln!(w, "[{}] {}", i + 1, card.title)?;
            if self.pretty && !card.description.is_empty() { writeln!(w, "    {}", card.description)?; }
            writeln!(w, "    image:   {}", card.image_url)?;
            writeln!(w, "    content: {}", card.open_content_url)?;
            writeln!(w, "    source:  {}", card.open_source_url)?;
        }
        Ok(())
    }
}

fn write_metadata(md: &Metadata, w: &mut dyn Write) -> io::Result<()> {
    if let Some(v) = &md.logo { writeln!(w, "  logo:    {}", v)?; }
    if let Some(v) = &md.theme { writeln!(w, "  theme:   {}", v)?; }
    if let Some(v) = &md.created { writeln!(w, "  created: {}", display_timestamp(v))?; }
    if let Some(v) = &md.updated { writeln!(w, "  updated: {}", display_timestamp(v))?; }
    if let Some(v) = &md.image { writeln!(w, "  image:   {}", v)?; }
    Ok(())
}

pub struct Emitter {
    presenter: Box<dyn Presenter>,
}

impl Emitter {
    pub fn new(cfg: OutputConfig) -> Self {
        let presenter: Box<dyn Presenter> = match cfg.format {
            OutputFormat::Json => Box::new(JsonPresenter { pretty: cfg.pretty }),
            OutputFormat::Text => Box::new(TextPresenter { pretty: cfg.pretty }),
        };
        Emitter { presenter }
    }

    pub fn emit(&self, op: &'static str, report: &Report<'_>, meta: Option<Meta>) -> io::Result<()> {
        let mut out = io::stdout().lock();
        self.presenter.emit(op, report, meta, &mut out)?;
        out.flush()
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }
