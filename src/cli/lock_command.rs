use crate::cli::Args;
use exlock::utils::duration::parse_duration;
use exlock::{acquire, AcquireMode, ExlockError, Result};
use std::io::Write;

pub fn execute_lock(args: Args) -> Result<()> {
    // Determine acquisition mode
    let mode = if args.no_wait {
        AcquireMode::NoWait
    } else if let Some(timeout) = &args.timeout {
        AcquireMode::Timeout(parse_duration(timeout)?)
    } else {
        AcquireMode::Wait
    };

    // Parse the hold duration up front so a bad value fails before locking
    let hold = args.hold.as_deref().map(parse_duration).transpose()?;

    if args.verbose > 0 {
        eprintln!("Acquiring lock: {} ({:?})", args.path.display(), mode);
    }

    let mut lock = match acquire(&args.path, mode.clone()) {
        Some(lock) => lock,
        None => {
            return Err(match mode {
                AcquireMode::NoWait => ExlockError::LockBusy(args.path),
                AcquireMode::Timeout(duration) => ExlockError::LockTimeout {
                    path: args.path,
                    duration,
                },
                AcquireMode::Wait => ExlockError::LockFailed(args.path),
            });
        }
    };

    if !args.quiet {
        // Announced on stdout so a parent process can wait for acquisition;
        // flush because the stream is block-buffered when piped
        println!("Lock acquired: {}", args.path.display());
        std::io::stdout().flush()?;
    }

    if let Some(hold) = hold {
        std::thread::sleep(hold);
    }

    lock.unlock();

    if !args.quiet {
        println!("Lock released: {}", args.path.display());
    }

    Ok(())
}
