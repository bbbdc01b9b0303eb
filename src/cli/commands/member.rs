use crate::cli::parser::MemberAction;
use crate::config::Config;
use crate::core::members::{MemberFilter, MemberLogic, MemberPatch};
use crate::core::pager::{paginate, render_window};
use crate::errors::AppResult;
use crate::models::member::{Member, MemberForm};
use crate::ui::messages::{errors, info, success, warning};
use crate::utils::colors::colorize_optional;
use crate::utils::path::expand_tilde;
use crate::utils::table::{Column, Table};
use std::fs::File;

pub fn handle(action: &MemberAction, cfg: &Config) -> AppResult<()> {
    let (mut pool, _officer) = super::open_signed_in(cfg)?;

    match action {
        MemberAction::Add {
            school_id,
            name,
            program,
            block,
            year_level,
        } => {
            let form = MemberForm {
                school_id: school_id.clone(),
                name: name.clone(),
                program: program.clone(),
                block: block.clone(),
                year_level: year_level.clone(),
            };
            let m = MemberLogic::add(&pool.conn, &form)?;
            success(format!("Member added: {} ({}) [id {}]", m.name, m.school_id, m.id));
        }

        MemberAction::Edit {
            id,
            school_id,
            name,
            program,
            block,
            year_level,
        } => {
            let patch = MemberPatch {
                school_id: school_id.clone(),
                name: name.clone(),
                program: program.clone(),
                block: block.clone(),
                year_level: year_level.clone(),
            };
            let m = MemberLogic::edit(&pool.conn, *id, &patch)?;
            success(format!("Member updated: {} ({})", m.name, m.school_id));
        }

        MemberAction::Del { id, yes } => {
            let m = MemberLogic::find(&pool.conn, *id)?;
            if !*yes
                && !super::confirm(&format!(
                    "Delete {} ({}) and all of their attendance?",
                    m.name, m.school_id
                ))?
            {
                info("Deletion cancelled.");
                return Ok(());
            }
            MemberLogic::delete(&pool.conn, *id)?;
            success(format!("Member deleted: {}", m.name));
        }

        MemberAction::List {
            school_id,
            name,
            program,
            block,
            year_level,
            page,
        } => {
            let filter = MemberFilter {
                school_id: school_id.clone(),
                name: name.clone(),
                program: *program,
                block: *block,
                year_level: *year_level,
            };
            let all = MemberLogic::list(&pool.conn, &MemberFilter::default())?;
            if all.is_empty() {
                info("No members yet. Add members to get started.");
                return Ok(());
            }

            let found: Vec<Member> = if filter.is_empty() {
                all
            } else {
                all.into_iter().filter(|m| filter.matches(m)).collect()
            };
            if found.is_empty() {
                info("No members found matching your search criteria.");
                return Ok(());
            }

            print_page(&found, *page, cfg);
        }

        MemberAction::Import { file } => {
            let path = expand_tilde(file);
            let input = File::open(&path)?;
            let report = MemberLogic::import(&mut pool.conn, input)?;

            if !report.invalid.is_empty() {
                warning(format!("{} line(s) skipped:", report.invalid.len()));
                errors(&report.invalid);
            }
            if report.duplicates > 0 {
                info(format!("{} duplicate school ID(s) skipped", report.duplicates));
            }
            success(format!("Imported {} member(s) from {}", report.imported, path.display()));
        }

        MemberAction::RecalcYears => {
            let report = MemberLogic::recalculate_year_levels(&mut pool.conn, cfg)?;
            success(format!(
                "Year levels recalculated for {} member(s) (academic year {})",
                report.updated,
                cfg.effective_academic_year()
            ));
            if report.skipped > 0 {
                warning(format!(
                    "{} member(s) skipped: school ID does not start with a two-digit year",
                    report.skipped
                ));
            }
        }
    }

    Ok(())
}

fn print_page(members: &[Member], requested: usize, cfg: &Config) {
    let page_size = cfg.page_size();
    let page = paginate(members, requested, page_size);

    let mut table = Table::new(vec![
        Column::new("ID", 6),
        Column::new("School ID", 14),
        Column::new("Name", 30),
        Column::new("Program", 10),
        Column::new("Block", 5),
        Column::new("Year", 8),
        Column::new("Joined", 10),
    ])
    .with_separator(&cfg.separator_char);
    for m in page.items {
        table.add_row(vec![
            m.id.to_string(),
            m.school_id.clone(),
            m.name.clone(),
            m.program.code().to_string(),
            m.block_label(),
            m.year_label(),
            m.joined(),
        ]);
    }

    print!(
        "{}",
        table.render_styled(|col, cell| match col {
            4 | 5 => colorize_optional(cell),
            _ => cell.to_string(),
        })
    );

    let first = (page.page - 1) * page_size + 1;
    let last = first + page.items.len() - 1;
    println!(
        "\nShowing {}-{} of {} members · page {}",
        first,
        last,
        page.total_items,
        render_window(page.page, page.total_pages)
    );
}
