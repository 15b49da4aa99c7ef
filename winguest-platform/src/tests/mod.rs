mod ssh_tests;
