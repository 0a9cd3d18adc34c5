//! List and authors subcommands for the tasklists CLI
//!
//! Every filter flag is optional. An omitted flag means "no parameter in
//! this request", so the value persisted in the session is reused.

use super::ViewerArgs;
use crate::filters::RequestParams;
use crate::format::OutputFormat;
use clap::Args;

/// Filter flags, mapped onto request parameter names.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Search title/alias; prefix with `id:` or `author:` to change the match
    #[arg(long)]
    pub search: Option<String>,

    /// Only task lists created by this user id (requires a project)
    #[arg(long, value_name = "USER_ID")]
    pub author: Option<String>,

    /// Invert the author filter
    #[arg(long)]
    pub exclude_author: bool,

    /// Published state: 0, 1, 2, -2, `*` for all, or empty for the default view
    #[arg(long, allow_hyphen_values = true)]
    pub published: Option<String>,

    /// Only task lists with this view level
    #[arg(long)]
    pub access: Option<String>,

    /// Milestone id; 0 selects task lists without a milestone
    #[arg(long)]
    pub milestone: Option<String>,

    /// Active project id, shared by every list; 0 clears it
    #[arg(long)]
    pub project: Option<String>,

    /// Layout name; each layout keeps its own filters
    #[arg(long)]
    pub layout: Option<String>,
}

impl FilterArgs {
    pub fn to_request(&self) -> RequestParams {
        let mut request = RequestParams::new();
        let pairs = [
            ("filter_search", &self.search),
            ("filter_author_id", &self.author),
            ("filter_published", &self.published),
            ("filter_access", &self.access),
            ("filter_milestone", &self.milestone),
            ("filter_project", &self.project),
            ("layout", &self.layout),
        ];
        for (name, value) in pairs {
            if let Some(value) = value {
                request.set(name, value.as_str());
            }
        }
        if self.exclude_author {
            request.set("filter_author_id_include", "0");
        }
        request
    }
}

/// Arguments for the list subcommand
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub viewer: ViewerArgs,

    /// Sort column (e.g. title, created, project_title)
    #[arg(long)]
    pub order: Option<String>,

    /// Sort direction: asc or desc
    #[arg(long)]
    pub dir: Option<String>,

    /// Page size; 0 lists everything
    #[arg(long)]
    pub limit: Option<String>,

    /// Row offset of the page
    #[arg(long)]
    pub start: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,
}

impl ListArgs {
    pub fn to_request(&self) -> RequestParams {
        let mut request = self.filters.to_request();
        let pairs = [
            ("filter_order", &self.order),
            ("filter_order_Dir", &self.dir),
            ("limit", &self.limit),
            ("limitstart", &self.start),
        ];
        for (name, value) in pairs {
            if let Some(value) = value {
                request.set(name, value.as_str());
            }
        }
        request
    }
}

/// Arguments for the authors subcommand
#[derive(Args, Debug)]
pub struct AuthorsArgs {
    /// Active project id (defaults to the persisted selection)
    #[arg(long)]
    pub project: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,
}

impl AuthorsArgs {
    pub fn to_request(&self) -> RequestParams {
        let mut request = RequestParams::new();
        if let Some(ref project) = self.project {
            request.set("filter_project", project.as_str());
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_given_flags_become_parameters() {
        let args = ListArgs {
            filters: FilterArgs {
                search: Some("sprint".to_string()),
                published: Some(String::new()),
                ..Default::default()
            },
            viewer: ViewerArgs::default(),
            order: Some("created".to_string()),
            dir: None,
            limit: None,
            start: None,
            format: OutputFormat::Json,
        };
        let request = args.to_request();

        assert_eq!(request.get("filter_search"), Some("sprint"));
        assert_eq!(request.get("filter_published"), Some(""));
        assert_eq!(request.get("filter_order"), Some("created"));
        assert_eq!(request.get("filter_project"), None);
        assert_eq!(request.get("filter_order_Dir"), None);
        assert_eq!(request.get("filter_author_id_include"), None);
    }
}
