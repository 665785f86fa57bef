use gitward::rules::force_push;
use gitward::{
    AuditLogger, ForcePushRule, GitVersion, PolicyConfig, Repository, RuleRegistry, TerminalPrompter,
};
use std::env;
use std::process;

// Exit codes: 0 accepted, 1 policy violation, 2 usage or infrastructure failure
const EXIT_VIOLATION: i32 = 1;
const EXIT_FAILURE: i32 = 2;

fn main() {
    let args: Vec<String> = env::args().collect();

    let code = match args.get(1).map(String::as_str) {
        Some("verify") if args.len() == 4 => verify(&args[2], &args[3]),
        Some("setup") if args.len() == 3 => setup(&args[2]),
        _ => {
            eprintln!("Usage:");
            eprintln!("  gitward verify <branch> <commit-ish>");
            eprintln!("  gitward setup <branch>");
            EXIT_FAILURE
        }
    };

    process::exit(code);
}

/// Validate a proposed update of `branch` to `rev` against the repository's policy
fn verify(branch: &str, rev: &str) -> i32 {
    if let Err(e) = GitVersion::validate() {
        eprintln!("Error: {}", e);
        return EXIT_FAILURE;
    }

    let repo = match Repository::discover() {
        Ok(repo) => repo,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_FAILURE;
        }
    };

    let policy = match PolicyConfig::load_for(&repo) {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_FAILURE;
        }
    };

    let registry = RuleRegistry::builtin();
    let rule_set = match policy.branch(branch) {
        Some(branch_policy) => match registry.rule_set(branch_policy) {
            Ok(rule_set) => rule_set,
            Err(e) => {
                eprintln!("Error: {}", e);
                return EXIT_FAILURE;
            }
        },
        None => {
            println!("No rules configured for branch '{}'; accepted", branch);
            return 0;
        }
    };

    let commit = match repo.rev_parse(rev) {
        Ok(commit) => commit,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_FAILURE;
        }
    };

    let logger = match AuditLogger::for_repository(&repo) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Error: failed to open audit log: {}", e);
            return EXIT_FAILURE;
        }
    };

    match rule_set.validate(commit, branch) {
        Ok(violations) if violations.is_empty() => {
            if let Err(e) = logger.log_accept(branch, commit.id()) {
                eprintln!("Warning: failed to write audit log: {}", e);
            }
            println!("Update of '{}' to {} accepted", branch, commit);
            0
        }
        Ok(violations) => {
            if let Err(e) = logger.log_violations(branch, commit.id(), &violations) {
                eprintln!("Warning: failed to write audit log: {}", e);
            }
            eprintln!("Update of '{}' to {} rejected:", branch, commit);
            for violation in &violations {
                eprintln!("  {}", violation);
            }
            EXIT_VIOLATION
        }
        Err(e) => {
            // Infrastructure fault, not a policy decision
            if let Err(log_err) = logger.log_failure(branch, commit.id(), &e) {
                eprintln!("Warning: failed to write audit log: {}", log_err);
            }
            eprintln!("Error: validation aborted: {}", e);
            EXIT_FAILURE
        }
    }
}

/// Interactively author a force_push policy entry for `branch`
fn setup(branch: &str) -> i32 {
    let repo = match Repository::discover() {
        Ok(repo) => repo,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_FAILURE;
        }
    };

    let mut policy = match PolicyConfig::load_for(&repo) {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_FAILURE;
        }
    };

    let mut prompter = TerminalPrompter::new();
    let options = match ForcePushRule::setup(&mut prompter) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_FAILURE;
        }
    };

    policy.set_rule(branch, force_push::RULE_NAME, options);

    let path = PolicyConfig::path_for(&repo);
    if let Err(e) = policy.save_to(&path) {
        eprintln!("Error: {}", e);
        return EXIT_FAILURE;
    }

    println!("Policy for branch '{}' written to {}", branch, path.display());
    0
}
